use crate::common::*;

use crate::errors::dashboard_error::*;

#[doc = "Chart kinds offered by the experiment view"]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperimentChartKind {
    Line,
    /// Scatter of X against Y with a continuous color scale over a third parameter.
    Heatmap,
}

impl ExperimentChartKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExperimentChartKind::Line => "line",
            ExperimentChartKind::Heatmap => "heatmap",
        }
    }
}

impl FromStr for ExperimentChartKind {
    type Err = DashboardError;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        match label.trim().to_lowercase().as_str() {
            "line" | "折線圖" => Ok(ExperimentChartKind::Line),
            "heatmap" | "熱力圖" => Ok(ExperimentChartKind::Heatmap),
            _ => Err(DashboardError::InvalidSelection(format!(
                "unknown experiment chart kind '{}'",
                label
            ))),
        }
    }
}
