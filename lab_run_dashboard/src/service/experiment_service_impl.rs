use crate::common::*;

use crate::dto::axis_selection::*;
use crate::enums::experiment_chart_kind::*;
use crate::errors::dashboard_error::*;
use crate::model::{
    chart::chart_spec::*,
    experiment::experiment_dataset::*,
    session::{loaded_dataset::*, session_state::*},
};
use crate::service::chart_dispatch::*;
use crate::traits::{
    repository_traits::experiment_source::*, service_traits::experiment_service::*,
};

#[derive(Debug, new)]
pub struct ExperimentServiceImpl<S: ExperimentSource> {
    experiment_source: S,
}

#[async_trait]
impl<S: ExperimentSource> ExperimentService for ExperimentServiceImpl<S> {
    async fn load_experiment(
        &self,
        session: &mut SessionState,
        run_id: i64,
    ) -> anyhow::Result<()> {
        let dataset: ExperimentDataset = self
            .experiment_source
            .load_by_id(run_id)
            .await
            .with_context(|| {
                format!(
                    "[ExperimentServiceImpl->load_experiment] Failed to load run {}",
                    run_id
                )
            })?
            .ok_or(DashboardError::NotFound(run_id))?;

        let parameters: Vec<String> = split_parameter_list(dataset.parameters());

        if parameters.is_empty() {
            return Err(DashboardError::NoParametersAvailable(run_id).into());
        }

        info!("Run {} loaded. Available parameters: {:?}", run_id, parameters);

        session.dataset = Some(LoadedDataset::new(
            run_id,
            dataset.to_table().clone(),
            parameters,
        ));

        Ok(())
    }

    fn build_experiment_chart(
        &self,
        session: &SessionState,
        kind: ExperimentChartKind,
        selection: &AxisSelection,
    ) -> anyhow::Result<ChartSpec> {
        let dataset: &LoadedDataset = session.dataset().ok_or_else(|| {
            DashboardError::InvalidSelection("no dataset loaded".to_string())
        })?;

        selection.validate(
            dataset.parameters(),
            kind == ExperimentChartKind::Heatmap,
        )?;

        let spec: ChartSpec = match kind {
            ExperimentChartKind::Line => ChartSpec::Line(line_chart(
                dataset.table(),
                selection.x(),
                selection.y(),
                None,
                None,
            )?),
            ExperimentChartKind::Heatmap => {
                let color: &str = selection.color().as_deref().ok_or_else(|| {
                    DashboardError::InvalidSelection(
                        "heatmap needs a color parameter".to_string(),
                    )
                })?;

                ChartSpec::Scatter(scatter_chart(
                    dataset.table(),
                    selection.x(),
                    selection.y(),
                    color,
                    &[],
                    ColorScale::Viridis,
                )?)
            }
        };

        Ok(spec)
    }
}
