use crate::common::*;

use crate::enums::chart_kind::*;
use crate::errors::dashboard_error::*;
use crate::model::{
    chart::chart_spec::*,
    configs::chart_config::*,
    table::{cell::*, data_table::*},
};

#[doc = r#"
    Maps a table and a chart kind to a chart description.

    1. `Scatter`   - `scatter_x` against `scatter_y`, colored by `scatter_color`
    2. `Line`      - `line_x` against `line_y`, one series per (`line_group`, `line_color`) pair
    3. `Surface`   - the `surface_z` columns as a rows x columns value grid
    4. `Histogram` - `histogram_x` split into at most `histogram_bins` equal-width buckets

    # Errors
    * `SchemaMismatch` - a column the kind needs is not in the table
"#]
pub fn create_plot(
    table: &DataTable,
    kind: ChartKind,
    columns: &ChartColumns,
) -> Result<ChartSpec, DashboardError> {
    let spec: ChartSpec = match kind {
        ChartKind::Scatter => ChartSpec::Scatter(scatter_chart(
            table,
            &columns.scatter_x,
            &columns.scatter_y,
            &columns.scatter_color,
            &columns.scatter_hover,
            ColorScale::Default,
        )?),
        ChartKind::Line => ChartSpec::Line(line_chart(
            table,
            &columns.line_x,
            &columns.line_y,
            Some(columns.line_group.as_str()),
            Some(columns.line_color.as_str()),
        )?),
        ChartKind::Surface => ChartSpec::Surface(surface_chart(table, &columns.surface_z)?),
        ChartKind::Histogram => ChartSpec::Histogram(histogram_chart(
            table,
            &columns.histogram_x,
            columns.histogram_bins,
        )?),
    };

    Ok(spec)
}

#[doc = "Same as `create_plot`, but takes the selector label and rejects unknown kinds"]
pub fn create_plot_from_label(
    table: &DataTable,
    label: &str,
    columns: &ChartColumns,
) -> Result<ChartSpec, DashboardError> {
    let kind: ChartKind = label.parse()?;
    create_plot(table, kind, columns)
}

pub fn scatter_chart(
    table: &DataTable,
    x_column: &str,
    y_column: &str,
    color_column: &str,
    hover_columns: &[String],
    color_scale: ColorScale,
) -> Result<ScatterChart, DashboardError> {
    let xs: &[Cell] = table.require_column(x_column)?;
    let ys: &[Cell] = table.require_column(y_column)?;
    let colors: &[Cell] = table.require_column(color_column)?;

    /* hover 컬럼은 존재하는 것만 사용 */
    let hover: Vec<(&String, &[Cell])> = hover_columns
        .iter()
        .filter_map(|name| match table.column(name) {
            Some(cells) => Some((name, cells)),
            None => {
                debug!("[chart_dispatch->scatter_chart] hover column '{}' is absent", name);
                None
            }
        })
        .collect();

    let points: Vec<ScatterPoint> = (0..table.row_count())
        .filter_map(|row| {
            let x: f64 = xs[row].as_f64()?;
            let y: f64 = ys[row].as_f64()?;
            let hover_cells: Vec<Cell> = hover.iter().map(|(_, cells)| cells[row].clone()).collect();

            Some(ScatterPoint::new(x, y, colors[row].as_f64(), hover_cells))
        })
        .collect();

    Ok(ScatterChart::new(
        x_column.to_string(),
        y_column.to_string(),
        color_column.to_string(),
        hover.iter().map(|(name, _)| name.to_string()).collect(),
        color_scale,
        points,
    ))
}

pub fn line_chart(
    table: &DataTable,
    x_column: &str,
    y_column: &str,
    group_column: Option<&str>,
    color_column: Option<&str>,
) -> Result<LineChart, DashboardError> {
    let xs: &[Cell] = table.require_column(x_column)?;
    let ys: &[Cell] = table.require_column(y_column)?;
    let groups: Option<&[Cell]> = group_column.map(|c| table.require_column(c)).transpose()?;
    let colors: Option<&[Cell]> = color_column.map(|c| table.require_column(c)).transpose()?;

    let mut series: IndexMap<(String, String), Vec<(f64, f64)>> = IndexMap::new();

    for row in 0..table.row_count() {
        let (Some(x), Some(y)) = (xs[row].as_f64(), ys[row].as_f64()) else {
            continue;
        };

        let group: String = groups.map(|g| g[row].to_string()).unwrap_or_default();
        let label: String = colors
            .map(|c| c[row].to_string())
            .unwrap_or_else(|| y_column.to_string());

        series.entry((group, label)).or_default().push((x, y));
    }

    Ok(LineChart::new(
        x_column.to_string(),
        y_column.to_string(),
        series
            .into_iter()
            .map(|((group, label), points)| LineSeries::new(group, label, points))
            .collect(),
    ))
}

pub fn surface_chart(
    table: &DataTable,
    z_columns: &[String],
) -> Result<SurfaceChart, DashboardError> {
    if z_columns.is_empty() {
        return Err(DashboardError::InvalidSelection(
            "surface chart needs at least one value column".to_string(),
        ));
    }

    let columns: Vec<&[Cell]> = z_columns
        .iter()
        .map(|name| table.require_column(name))
        .collect::<Result<_, _>>()?;

    let grid: Vec<Vec<f64>> = (0..table.row_count())
        .filter_map(|row| {
            columns
                .iter()
                .map(|cells| cells[row].as_f64())
                .collect::<Option<Vec<f64>>>()
        })
        .collect();

    Ok(SurfaceChart::new(z_columns.to_vec(), grid))
}

pub fn histogram_chart(
    table: &DataTable,
    column: &str,
    nbins: usize,
) -> Result<HistogramChart, DashboardError> {
    let values: Vec<f64> = table
        .require_column(column)?
        .iter()
        .filter_map(Cell::as_f64)
        .collect();

    Ok(HistogramChart::new(column.to_string(), bin_values(&values, nbins)))
}

#[doc = "Equal-width bins over [min, max]; the max value falls into the last bin"]
fn bin_values(values: &[f64], nbins: usize) -> Vec<HistogramBin> {
    let nbins: usize = nbins.max(1);

    let (min, max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(*v), hi.max(*v))
        });

    if values.is_empty() {
        return Vec::new();
    }

    if min == max {
        return vec![HistogramBin::new(min, max, values.len())];
    }

    let width: f64 = (max - min) / nbins as f64;
    let mut counts: Vec<usize> = vec![0; nbins];

    for value in values {
        let idx: usize = (((value - min) / width).floor() as usize).min(nbins - 1);
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(idx, count)| {
            let lower: f64 = min + width * idx as f64;
            let upper: f64 = if idx + 1 == nbins {
                max
            } else {
                min + width * (idx + 1) as f64
            };
            HistogramBin::new(lower, upper, count)
        })
        .collect()
}
