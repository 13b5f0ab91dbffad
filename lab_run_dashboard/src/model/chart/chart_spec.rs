use crate::common::*;

use crate::enums::chart_kind::*;
use crate::model::table::cell::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorScale {
    Default,
    Viridis,
}

#[derive(Debug, Clone, PartialEq, new)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    pub color: Option<f64>,
    pub hover: Vec<Cell>,
}

#[derive(Debug, Clone, PartialEq, Getters, new)]
#[getset(get = "pub")]
pub struct ScatterChart {
    x_column: String,
    y_column: String,
    color_column: String,
    hover_columns: Vec<String>,
    color_scale: ColorScale,
    points: Vec<ScatterPoint>,
}

#[derive(Debug, Clone, PartialEq, Getters, new)]
#[getset(get = "pub")]
pub struct LineSeries {
    group: String,
    label: String,
    points: Vec<(f64, f64)>,
}

#[derive(Debug, Clone, PartialEq, Getters, new)]
#[getset(get = "pub")]
pub struct LineChart {
    x_column: String,
    y_column: String,
    series: Vec<LineSeries>,
}

#[derive(Debug, Clone, PartialEq, Getters, new)]
#[getset(get = "pub")]
pub struct SurfaceChart {
    z_columns: Vec<String>,
    grid: Vec<Vec<f64>>,
}

#[derive(Debug, Clone, PartialEq, new)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Getters, new)]
#[getset(get = "pub")]
pub struct HistogramChart {
    column: String,
    bins: Vec<HistogramBin>,
}

#[doc = r#"
    Backend-independent description of a chart: which columns it uses and
    the numeric data it plots. Produced by the chart dispatcher, consumed by
    the renderer.
"#]
#[derive(Debug, Clone, PartialEq)]
pub enum ChartSpec {
    Scatter(ScatterChart),
    Line(LineChart),
    Surface(SurfaceChart),
    Histogram(HistogramChart),
}

impl ChartSpec {
    pub fn kind(&self) -> ChartKind {
        match self {
            ChartSpec::Scatter(_) => ChartKind::Scatter,
            ChartSpec::Line(_) => ChartKind::Line,
            ChartSpec::Surface(_) => ChartKind::Surface,
            ChartSpec::Histogram(_) => ChartKind::Histogram,
        }
    }

    #[cfg(test)]
    #[doc = "Number of plotted data points across all series, bins or grid cells"]
    pub fn data_len(&self) -> usize {
        match self {
            ChartSpec::Scatter(chart) => chart.points.len(),
            ChartSpec::Line(chart) => chart.series.iter().map(|s| s.points.len()).sum(),
            ChartSpec::Surface(chart) => chart.grid.iter().map(Vec::len).sum(),
            ChartSpec::Histogram(chart) => chart.bins.iter().map(|b| b.count).sum(),
        }
    }
}
