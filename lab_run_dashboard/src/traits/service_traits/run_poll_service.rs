use crate::common::*;

use crate::model::run::fetched_batch::*;

#[async_trait]
pub trait RunPollService: Send + Sync {
    async fn init_database(&self) -> anyhow::Result<()>;
    #[doc = r#"
        Fetches the runs newer than `last_index`.
        The batch's watermark is the highest id seen, or `last_index` when nothing is new.
        Results are memoized per `last_index` for the cache window.
    "#]
    async fn fetch_live_data(&self, last_index: i64) -> anyhow::Result<FetchedBatch>;
}
