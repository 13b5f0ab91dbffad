use crate::common::*;

use crate::model::run::run_record::*;

#[async_trait]
pub trait RunRepository: Send + Sync {
    #[doc = "Creates the `runs` table (and the database file) when missing; no-op otherwise"]
    async fn init_schema(&self) -> anyhow::Result<()>;
    #[doc = "Records with `id > last_index`, ascending by id"]
    async fn fetch_runs_after(&self, last_index: i64) -> anyhow::Result<Vec<RunRecord>>;
}
