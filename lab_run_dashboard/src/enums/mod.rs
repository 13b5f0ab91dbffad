pub mod chart_kind;
pub mod experiment_chart_kind;
pub mod run_mode;
