use crate::common::*;

use tokio::time::MissedTickBehavior;

use crate::dto::axis_selection::*;
use crate::enums::{experiment_chart_kind::*, run_mode::*};
use crate::errors::dashboard_error::*;
use crate::model::{
    chart::chart_spec::*,
    configs::{chart_config::*, experiment_config::*, system_config::*},
    run::fetched_batch::*,
    session::{loaded_dataset::*, session_state::*},
    table::data_table::*,
};
use crate::service::chart_dispatch::*;
use crate::utils_modules::time_utils::*;
use crate::traits::service_traits::{
    chart_service::*, experiment_service::*, run_poll_service::*,
};

const PREVIEW_ROWS: usize = 10;

#[derive(Debug, new)]
pub struct MainController<P: RunPollService, E: ExperimentService, C: ChartService> {
    run_poll_service: P,
    experiment_service: E,
    chart_service: C,
    system_config: SystemConfig,
    chart_config: ChartConfig,
}

impl<P: RunPollService, E: ExperimentService, C: ChartService> MainController<P, E, C> {
    #[doc = r#"
        Entry point: makes sure the monitor `runs` table exists, then runs the
        configured mode.

        1. `polling`    - `polling_task` until the stop signal fires
        2. `experiment` - `experiment_task` once with a fresh session

        # Returns
        * `anyhow::Result<()>` - Err only for failures that are not recoverable
    "#]
    pub async fn main_task(
        &self,
        experiment_config: &ExperimentConfig,
        stop: watch::Receiver<bool>,
    ) -> anyhow::Result<()> {
        self.run_poll_service.init_database().await?;

        match self.system_config.mode {
            RunMode::Polling => {
                self.polling_task(stop).await?;
            }
            RunMode::Experiment => {
                let mut session: SessionState = SessionState::new();
                self.experiment_task(&mut session, experiment_config).await?;
            }
        }

        Ok(())
    }

    #[doc = r#"
        Live view loop. Every `poll_interval` it fetches the runs above the
        current watermark and redraws the configured chart from the new rows.

        A failed cycle is logged and the loop moves on to the next tick. The
        loop ends when the stop signal is set (or its sender is dropped).

        # Returns
        * `anyhow::Result<i64>` - the watermark reached when the loop stopped
    "#]
    pub async fn polling_task(&self, mut stop: watch::Receiver<bool>) -> anyhow::Result<i64> {
        let mut ticker: Interval = interval(self.system_config.poll_interval());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut last_index: i64 = 0;

        info!(
            "Polling started (interval {:?}, chart '{}')",
            self.system_config.poll_interval(),
            self.chart_config.chart_kind
        );

        loop {
            if *stop.borrow() {
                break;
            }

            tokio::select! {
                _ = ticker.tick() => {
                    match self.poll_once(last_index).await {
                        Ok(watermark) => last_index = watermark,
                        Err(e) => {
                            error!("[MainController->polling_task] Failed to poll runs: {:?}", e);
                        }
                    }
                }
                changed = stop.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
            }
        }

        info!("Polling stopped at watermark {}", last_index);

        Ok(last_index)
    }

    #[doc = "One poll cycle; the watermark advances even when the chart cannot be drawn"]
    async fn poll_once(&self, last_index: i64) -> anyhow::Result<i64> {
        let batch: FetchedBatch = self.run_poll_service.fetch_live_data(last_index).await?;
        let watermark: i64 = *batch.watermark();

        if batch.is_empty() {
            return Ok(watermark);
        }

        if let Err(e) = self.render_live_chart(&batch).await {
            match DashboardError::classify(&e) {
                Some(classified) => {
                    error!("[MainController->poll_once] {}", classified);
                }
                None => {
                    error!("[MainController->poll_once] Failed to render chart: {:?}", e);
                }
            }
        }

        Ok(watermark)
    }

    async fn render_live_chart(&self, batch: &FetchedBatch) -> anyhow::Result<PathBuf> {
        let table: DataTable = batch.to_table();

        let chart: ChartSpec = create_plot_from_label(
            &table,
            &self.chart_config.chart_kind,
            &self.chart_config.columns,
        )?;

        let output_path: PathBuf = Path::new(&self.chart_config.output_dir)
            .join(format!("live_{}.png", chart.kind().as_str()));

        let title: String = format!(
            "Live runs {} - {} ({})",
            batch.records().first().map_or(0, |r| r.id),
            batch.watermark(),
            get_current_local_naivedatetime_str()
        );

        self.chart_service
            .render_chart(&title, &chart, &output_path)
            .await?;

        Ok(output_path)
    }

    #[doc = r#"
        Experiment view: loads the configured run into `session`, logs the
        available parameters and a preview of the samples, then draws the
        chosen chart.

        Classified failures (unknown run, empty parameter list, bad selection,
        missing column) are reported and leave `Ok(None)`; the session keeps
        whatever dataset it held before a failed load.

        # Returns
        * `anyhow::Result<Option<PathBuf>>` - path of the rendered chart
    "#]
    pub async fn experiment_task(
        &self,
        session: &mut SessionState,
        experiment_config: &ExperimentConfig,
    ) -> anyhow::Result<Option<PathBuf>> {
        match self.load_and_render(session, experiment_config).await {
            Ok(path) => Ok(Some(path)),
            Err(e) => match DashboardError::classify(&e) {
                Some(classified) => {
                    error!(
                        "[MainController->experiment_task] Failed to load experiment data: {}",
                        classified
                    );
                    Ok(None)
                }
                None => Err(e),
            },
        }
    }

    async fn load_and_render(
        &self,
        session: &mut SessionState,
        experiment_config: &ExperimentConfig,
    ) -> anyhow::Result<PathBuf> {
        let run_id: i64 = experiment_config.run_id;

        self.experiment_service
            .load_experiment(session, run_id)
            .await?;

        let dataset: &LoadedDataset = session.dataset().ok_or_else(|| {
            DashboardError::InvalidSelection("no dataset loaded".to_string())
        })?;

        info!("Available parameters: {:?}", dataset.parameters());
        info!("Run {} preview:\n{}", run_id, dataset.table().preview(PREVIEW_ROWS));

        let kind: ExperimentChartKind = experiment_config.chart_kind.parse()?;

        let selection: AxisSelection = AxisSelection::resolve(
            dataset.parameters(),
            experiment_config.x_param.as_deref(),
            experiment_config.y_param.as_deref(),
            experiment_config.color_param.as_deref(),
        )?;

        let chart: ChartSpec = self
            .experiment_service
            .build_experiment_chart(session, kind, &selection)?;

        let output_path: PathBuf = Path::new(&self.chart_config.output_dir)
            .join(format!("run_{}_{}.png", run_id, kind.as_str()));

        let title: String = format!("Run {}: {} vs {}", run_id, selection.y, selection.x);

        self.chart_service
            .render_chart(&title, &chart, &output_path)
            .await?;

        Ok(output_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use parking_lot::Mutex;
    use std::collections::HashMap;

    use crate::enums::chart_kind::*;
    use crate::model::{experiment::experiment_dataset::*, run::run_record::*, table::cell::*};
    use crate::service::experiment_service_impl::*;
    use crate::traits::repository_traits::experiment_source::*;

    #[derive(Clone, Default)]
    struct SharedRunsPollService {
        rows: Arc<Mutex<Vec<RunRecord>>>,
    }

    impl SharedRunsPollService {
        fn push(&self, payload: &str) {
            let mut rows = self.rows.lock();
            let id: i64 = rows.len() as i64 + 1;
            rows.push(RunRecord::new(
                id,
                None,
                Some("iv".to_string()),
                Some(payload.as_bytes().to_vec()),
            ));
        }
    }

    #[async_trait]
    impl RunPollService for SharedRunsPollService {
        async fn init_database(&self) -> anyhow::Result<()> {
            Ok(())
        }

        async fn fetch_live_data(&self, last_index: i64) -> anyhow::Result<FetchedBatch> {
            let records: Vec<RunRecord> = self
                .rows
                .lock()
                .iter()
                .filter(|r| r.id > last_index)
                .cloned()
                .collect();
            Ok(FetchedBatch::from_records(records, last_index))
        }
    }

    #[derive(Clone, Default)]
    struct RecordingChartService {
        rendered: Arc<Mutex<Vec<(String, ChartKind, PathBuf, usize)>>>,
    }

    #[async_trait]
    impl ChartService for RecordingChartService {
        async fn render_chart(
            &self,
            title: &str,
            chart: &ChartSpec,
            output_path: &Path,
        ) -> anyhow::Result<()> {
            self.rendered.lock().push((
                title.to_string(),
                chart.kind(),
                output_path.to_path_buf(),
                chart.data_len(),
            ));
            Ok(())
        }
    }

    #[derive(Default)]
    struct MemoryExperimentSource {
        runs: HashMap<i64, ExperimentDataset>,
    }

    #[async_trait]
    impl ExperimentSource for MemoryExperimentSource {
        async fn load_by_id(&self, run_id: i64) -> anyhow::Result<Option<ExperimentDataset>> {
            Ok(self.runs.get(&run_id).cloned())
        }
    }

    type TestController = MainController<
        SharedRunsPollService,
        ExperimentServiceImpl<MemoryExperimentSource>,
        RecordingChartService,
    >;

    fn controller(
        poll: &SharedRunsPollService,
        charts: &RecordingChartService,
        chart_kind: &str,
        runs: Vec<(i64, ExperimentDataset)>,
    ) -> TestController {
        let chart_config: ChartConfig = ChartConfig {
            output_dir: "charts".to_string(),
            chart_kind: chart_kind.to_string(),
            ..ChartConfig::default()
        };

        MainController::new(
            poll.clone(),
            ExperimentServiceImpl::new(MemoryExperimentSource {
                runs: runs.into_iter().collect(),
            }),
            charts.clone(),
            SystemConfig::new(RunMode::Polling, 1.0, 300),
            chart_config,
        )
    }

    fn iv_dataset() -> ExperimentDataset {
        let table: DataTable = DataTable::from_columns(vec![
            ("voltage", vec![Cell::Float(0.0), Cell::Float(1.0)]),
            ("current", vec![Cell::Float(0.0), Cell::Float(1e-3)]),
        ])
        .unwrap();
        ExperimentDataset::new(table, "voltage,current".to_string())
    }

    fn experiment_config(run_id: i64, chart_kind: &str) -> ExperimentConfig {
        ExperimentConfig {
            run_id,
            chart_kind: chart_kind.to_string(),
            ..ExperimentConfig::default()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn polling_renders_each_new_batch_until_stopped() {
        let poll: SharedRunsPollService = SharedRunsPollService::default();
        let charts: RecordingChartService = RecordingChartService::default();
        poll.push(r#"{"current": 1.0}"#);
        poll.push(r#"{"current": 2.0}"#);

        let controller: TestController = controller(&poll, &charts, "histogram", Vec::new());
        let (stop_tx, stop_rx) = watch::channel(false);

        let driver = async {
            tokio::time::sleep(Duration::from_millis(500)).await;
            poll.push(r#"{"current": 3.0}"#);
            tokio::time::sleep(Duration::from_secs(1)).await;
            stop_tx.send(true).unwrap();
        };

        let (watermark, _) = tokio::join!(controller.polling_task(stop_rx), driver);

        assert_eq!(watermark.unwrap(), 3);

        let rendered = charts.rendered.lock();
        assert_eq!(rendered.len(), 2);
        assert_eq!(rendered[0].1, ChartKind::Histogram);
        assert_eq!(rendered[0].2, PathBuf::from("charts/live_histogram.png"));
        /* 두번째 렌더링은 새로 들어온 행만 포함 */
        assert_eq!(rendered[0].3, 2);
        assert_eq!(rendered[1].3, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn idle_ticks_do_not_render() {
        let poll: SharedRunsPollService = SharedRunsPollService::default();
        let charts: RecordingChartService = RecordingChartService::default();
        let controller: TestController = controller(&poll, &charts, "scatter", Vec::new());
        let (stop_tx, stop_rx) = watch::channel(false);

        let driver = async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            stop_tx.send(true).unwrap();
        };

        let (watermark, _) = tokio::join!(controller.polling_task(stop_rx), driver);

        assert_eq!(watermark.unwrap(), 0);
        assert!(charts.rendered.lock().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn unknown_chart_kind_is_reported_and_polling_continues() {
        let poll: SharedRunsPollService = SharedRunsPollService::default();
        let charts: RecordingChartService = RecordingChartService::default();
        poll.push(r#"{"current": 1.0}"#);

        let controller: TestController = controller(&poll, &charts, "pie", Vec::new());
        let (stop_tx, stop_rx) = watch::channel(false);

        let driver = async {
            tokio::time::sleep(Duration::from_millis(1500)).await;
            poll.push(r#"{"current": 2.0}"#);
            tokio::time::sleep(Duration::from_secs(1)).await;
            stop_tx.send(true).unwrap();
        };

        let (watermark, _) = tokio::join!(controller.polling_task(stop_rx), driver);

        assert_eq!(watermark.unwrap(), 2);
        assert!(charts.rendered.lock().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_stop_sender_ends_polling() {
        let poll: SharedRunsPollService = SharedRunsPollService::default();
        let charts: RecordingChartService = RecordingChartService::default();
        let controller: TestController = controller(&poll, &charts, "line", Vec::new());
        let (stop_tx, stop_rx) = watch::channel(false);

        drop(stop_tx);

        assert_eq!(controller.polling_task(stop_rx).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn experiment_task_renders_selected_chart() {
        let poll: SharedRunsPollService = SharedRunsPollService::default();
        let charts: RecordingChartService = RecordingChartService::default();
        let controller: TestController =
            controller(&poll, &charts, "scatter", vec![(1, iv_dataset())]);
        let mut session: SessionState = SessionState::new();

        let path: Option<PathBuf> = controller
            .experiment_task(&mut session, &experiment_config(1, "line"))
            .await
            .unwrap();

        assert_eq!(path, Some(PathBuf::from("charts/run_1_line.png")));
        assert!(session.dataset().is_some());

        let rendered = charts.rendered.lock();
        assert_eq!(rendered.len(), 1);
        assert_eq!(rendered[0].0, "Run 1: current vs voltage");
        assert_eq!(rendered[0].1, ChartKind::Line);
        assert_eq!(rendered[0].3, 2);
    }

    #[tokio::test]
    async fn experiment_task_reports_missing_run_and_keeps_session() {
        let poll: SharedRunsPollService = SharedRunsPollService::default();
        let charts: RecordingChartService = RecordingChartService::default();
        let controller: TestController =
            controller(&poll, &charts, "scatter", vec![(2, iv_dataset())]);
        let mut session: SessionState = SessionState::new();

        controller
            .experiment_task(&mut session, &experiment_config(2, "line"))
            .await
            .unwrap();
        let before: SessionState = session.clone();

        let path: Option<PathBuf> = controller
            .experiment_task(&mut session, &experiment_config(1, "line"))
            .await
            .unwrap();

        assert!(path.is_none());
        assert_eq!(session, before);
        assert_eq!(charts.rendered.lock().len(), 1);
    }

    #[tokio::test]
    async fn experiment_task_reports_bad_chart_toggle() {
        let poll: SharedRunsPollService = SharedRunsPollService::default();
        let charts: RecordingChartService = RecordingChartService::default();
        let controller: TestController =
            controller(&poll, &charts, "scatter", vec![(1, iv_dataset())]);
        let mut session: SessionState = SessionState::new();

        let path: Option<PathBuf> = controller
            .experiment_task(&mut session, &experiment_config(1, "surface"))
            .await
            .unwrap();

        assert!(path.is_none());
        assert!(charts.rendered.lock().is_empty());
    }
}
