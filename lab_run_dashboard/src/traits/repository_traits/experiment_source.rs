use crate::common::*;

use crate::model::experiment::experiment_dataset::*;

#[doc = r#"
    Read-only lookup into the experiment database kept by the instrument
    framework. `Ok(None)` means the run id does not exist.
"#]
#[async_trait]
pub trait ExperimentSource: Send + Sync {
    async fn load_by_id(&self, run_id: i64) -> anyhow::Result<Option<ExperimentDataset>>;
}
