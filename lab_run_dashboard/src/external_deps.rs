pub use chrono::{DateTime, Local, NaiveDateTime, Utc};
pub use flexi_logger::{
    Age, Cleanup, Criterion, DeferredNow, Duplicate, FileSpec, Logger, LoggerHandle, Naming, Record,
};
pub use indexmap::IndexMap;
pub use once_cell::sync::Lazy as once_lazy;
pub use moka::future::Cache;

pub use sqlx::{
    Column, ColumnIndex, ConnectOptions, Connection, Row, TypeInfo, ValueRef,
    sqlite::{SqliteConnectOptions, SqliteConnection, SqliteRow},
};

pub use tokio::sync::watch;
