pub mod chart_dispatch;
pub mod chart_service_impl;
pub mod experiment_service_impl;
pub mod run_poll_service_impl;
