pub mod chart_config;
pub mod experiment_config;
pub mod sqlite_config;
pub mod system_config;
pub mod total_config;
