/*
Author      : Seunghwan Shin
Create date : 2025-10-00
Description : Live monitor and experiment viewer for lab measurement runs stored in sqlite

History     : 2025-10-00 Seunghwan Shin       # [v.1.0.0] first create
*/

mod common;
mod external_deps;
mod prelude;
use common::*;

mod dto;

mod enums;

mod env_configuration;

mod errors;

mod traits;

mod model;
use model::configs::total_config::*;

mod repository;
use repository::{qcodes_source_impl::*, run_repository_impl::*};

mod utils_modules;
use utils_modules::logger_utils::*;

mod service;
use service::{chart_service_impl::*, experiment_service_impl::*, run_poll_service_impl::*};

mod controller;
use controller::main_controller::*;

#[tokio::main]
async fn main() {
    /* 전역로거 설정 및 초기 설정 */
    dotenv().ok();
    let _logger_handle: LoggerHandle = set_global_logger().unwrap_or_else(|e| {
        let err_msg: &str = "[main] Failed to initialize the global logger.";
        eprintln!("{} {:?}", err_msg, e);
        panic!("{} {:?}", err_msg, e)
    });

    info!("Lab run dashboard start!");

    let system_config = get_system_config_info();
    let sqlite_config = get_sqlite_config_info();
    let chart_config = get_chart_config_info();

    /* 실험 DB 경로가 없으면 모니터 DB 를 그대로 사용 */
    let qcodes_db_path: String = sqlite_config
        .qcodes_db_path
        .clone()
        .unwrap_or_else(|| sqlite_config.monitor_db_path.clone());

    /* 의존 주입 */
    let run_repository: Arc<RunRepositoryImpl> =
        Arc::new(RunRepositoryImpl::new(&sqlite_config.monitor_db_path));
    let run_poll_service: RunPollServiceImpl<RunRepositoryImpl> =
        RunPollServiceImpl::new(run_repository, system_config.cache_ttl());
    let experiment_service: ExperimentServiceImpl<QcodesSourceImpl> =
        ExperimentServiceImpl::new(QcodesSourceImpl::new(qcodes_db_path));
    let chart_service: ChartServiceImpl =
        ChartServiceImpl::new(chart_config.width, chart_config.height);

    let main_controller: MainController<
        RunPollServiceImpl<RunRepositoryImpl>,
        ExperimentServiceImpl<QcodesSourceImpl>,
        ChartServiceImpl,
    > = MainController::new(
        run_poll_service,
        experiment_service,
        chart_service,
        system_config.clone(),
        chart_config.clone(),
    );

    /* Ctrl-C 가 들어오면 폴링 루프를 멈춘다 */
    let (stop_tx, stop_rx) = watch::channel(false);

    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Shutdown signal received.");
                let _ = stop_tx.send(true);
            }
            Err(e) => {
                error!("[main] Failed to listen for the shutdown signal: {:?}", e);
            }
        }
    });

    main_controller
        .main_task(get_experiment_config_info(), stop_rx)
        .await
        .unwrap_or_else(|e| {
            error!("{:?}", e);
            panic!("{:?}", e)
        });

    info!("Lab run dashboard stopped.");
}
