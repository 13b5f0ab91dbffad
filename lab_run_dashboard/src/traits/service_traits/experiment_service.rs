use crate::common::*;

use crate::dto::axis_selection::*;
use crate::enums::experiment_chart_kind::*;
use crate::model::{chart::chart_spec::*, session::session_state::*};

#[async_trait]
pub trait ExperimentService: Send + Sync {
    #[doc = r#"
        Loads run `run_id` into `session`.
        Fails with `NotFound` for an unknown id and `NoParametersAvailable` when the
        run's parameter list is empty; the session is untouched on any failure.
    "#]
    async fn load_experiment(&self, session: &mut SessionState, run_id: i64)
        -> anyhow::Result<()>;

    #[doc = "Builds the line or heatmap chart for the selected parameters of the loaded dataset"]
    fn build_experiment_chart(
        &self,
        session: &SessionState,
        kind: ExperimentChartKind,
        selection: &AxisSelection,
    ) -> anyhow::Result<ChartSpec>;
}
