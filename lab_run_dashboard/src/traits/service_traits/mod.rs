pub mod chart_service;
pub mod experiment_service;
pub mod run_poll_service;
