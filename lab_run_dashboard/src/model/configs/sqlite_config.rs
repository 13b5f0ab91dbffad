use crate::common::*;

pub const DEFAULT_MONITOR_DB_PATH: &str = "data/monitor_runs.db";

fn default_monitor_db_path() -> String {
    DEFAULT_MONITOR_DB_PATH.to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize, Getters)]
#[getset(get = "pub")]
pub struct SqliteConfig {
    #[serde(default = "default_monitor_db_path")]
    pub monitor_db_path: String,
    pub qcodes_db_path: Option<String>,
}

impl Default for SqliteConfig {
    fn default() -> Self {
        Self {
            monitor_db_path: default_monitor_db_path(),
            qcodes_db_path: None,
        }
    }
}
