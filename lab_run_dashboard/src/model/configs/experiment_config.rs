use crate::common::*;

fn default_run_id() -> i64 {
    1
}

fn default_experiment_chart_kind() -> String {
    "line".to_string()
}

#[doc = "Experiment view inputs: the run to load, the chart toggle and the axis pickers"]
#[derive(Debug, Clone, Deserialize, Serialize, Getters)]
#[getset(get = "pub")]
pub struct ExperimentConfig {
    #[serde(default = "default_run_id")]
    pub run_id: i64,
    #[serde(default = "default_experiment_chart_kind")]
    pub chart_kind: String,
    pub x_param: Option<String>,
    pub y_param: Option<String>,
    pub color_param: Option<String>,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            run_id: default_run_id(),
            chart_kind: default_experiment_chart_kind(),
            x_param: None,
            y_param: None,
            color_param: None,
        }
    }
}
