use crate::common::*;

use crate::errors::dashboard_error::*;

#[doc = "Chart kinds offered by the live (polling) view"]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Scatter,
    Line,
    Surface,
    Histogram,
}

impl ChartKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKind::Scatter => "scatter",
            ChartKind::Line => "line",
            ChartKind::Surface => "surface",
            ChartKind::Histogram => "histogram",
        }
    }
}

impl Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ChartKind {
    type Err = DashboardError;

    #[doc = "Accepts the english names (any case) and the Chinese control-panel labels"]
    fn from_str(label: &str) -> Result<Self, Self::Err> {
        match label.trim().to_lowercase().as_str() {
            "scatter" | "散點圖" => Ok(ChartKind::Scatter),
            "line" | "線圖" => Ok(ChartKind::Line),
            "surface" | "表面圖" => Ok(ChartKind::Surface),
            "histogram" | "直方圖" => Ok(ChartKind::Histogram),
            _ => Err(DashboardError::InvalidSelection(format!(
                "unknown chart kind '{}'",
                label
            ))),
        }
    }
}
