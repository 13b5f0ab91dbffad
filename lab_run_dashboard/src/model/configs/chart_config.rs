use crate::common::*;

fn default_output_dir() -> String {
    "charts".to_string()
}

fn default_width() -> u32 {
    1400
}

fn default_height() -> u32 {
    700
}

fn default_chart_kind() -> String {
    "scatter".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize, Getters)]
#[getset(get = "pub")]
pub struct ChartConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    /// Label of the live chart kind; parsed on every tick so a bad value is reported, not fatal.
    #[serde(default = "default_chart_kind")]
    pub chart_kind: String,
    #[serde(default)]
    pub columns: ChartColumns,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            width: default_width(),
            height: default_height(),
            chart_kind: default_chart_kind(),
            columns: ChartColumns::default(),
        }
    }
}

#[doc = r#"
    Which table columns each live chart kind reads.
    Defaults follow the measurement columns the instrument scripts record.
"#]
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ChartColumns {
    pub scatter_x: String,
    pub scatter_y: String,
    pub scatter_color: String,
    pub scatter_hover: Vec<String>,
    pub line_x: String,
    pub line_y: String,
    pub line_group: String,
    pub line_color: String,
    pub surface_z: Vec<String>,
    pub histogram_x: String,
    pub histogram_bins: usize,
}

impl Default for ChartColumns {
    fn default() -> Self {
        Self {
            scatter_x: "voltage".to_string(),
            scatter_y: "current".to_string(),
            scatter_color: "temperature".to_string(),
            scatter_hover: vec!["frequency".to_string()],
            line_x: "time".to_string(),
            line_y: "current".to_string(),
            line_group: "id".to_string(),
            line_color: "parameters".to_string(),
            surface_z: vec![
                "voltage".to_string(),
                "current".to_string(),
                "temperature".to_string(),
            ],
            histogram_x: "current".to_string(),
            histogram_bins: 50,
        }
    }
}
