use thiserror::Error;

#[doc = r#"
    Failures that are recoverable at the dashboard boundary.

    Anything raised as one of these variants is logged and the current
    cycle (poll tick or experiment load) is abandoned; the process keeps running.
    Lower-level failures (sqlx, io, plotters) travel as plain `anyhow::Error`.
"#]
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DashboardError {
    #[error("dataset not found: no run with id {0}")]
    NotFound(i64),
    #[error("schema mismatch: expected column '{0}' is absent")]
    SchemaMismatch(String),
    #[error("invalid selection: {0}")]
    InvalidSelection(String),
    #[error("no parameters available for run {0}")]
    NoParametersAvailable(i64),
}

impl DashboardError {
    #[doc = "Returns the classified error if `err` carries one anywhere in its chain."]
    pub fn classify(err: &anyhow::Error) -> Option<&DashboardError> {
        err.chain().find_map(|cause| cause.downcast_ref::<DashboardError>())
    }
}
