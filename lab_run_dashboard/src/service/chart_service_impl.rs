use crate::common::*;
use crate::model::chart::chart_spec::{
    ChartSpec, ColorScale, HistogramChart, LineChart, ScatterChart, SurfaceChart,
};
use crate::traits::service_traits::chart_service::*;
use crate::utils_modules::{io_utils::*, si_format::*};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;

/* dark template */
const BACKGROUND: RGBColor = RGBColor(20, 20, 20);
const GRID_COLOR: RGBColor = RGBColor(60, 60, 60);
const AXIS_COLOR: RGBColor = RGBColor(120, 120, 120);
const TEXT_COLOR: RGBColor = RGBColor(200, 200, 200);
const TITLE_COLOR: RGBColor = RGBColor(240, 240, 240);

const SERIES_PALETTE: [RGBColor; 6] = [
    RGBColor(0, 191, 255),
    RGBColor(255, 99, 71),
    RGBColor(50, 205, 50),
    RGBColor(255, 215, 0),
    RGBColor(186, 85, 211),
    RGBColor(255, 140, 0),
];

#[derive(Debug, Clone, new)]
pub struct ChartServiceImpl {
    width: u32,
    height: u32,
}

#[doc = "Axis range with 10% padding; degenerate input still gives a drawable range"]
fn padded_range<I: Iterator<Item = f64>>(values: I) -> (f64, f64) {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });

    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }

    if min == max {
        let pad: f64 = if min == 0.0 { 1.0 } else { min.abs() * 0.1 };
        return (min - pad, max + pad);
    }

    let padding: f64 = (max - min) * 0.1;
    (min - padding, max + padding)
}

#[doc = "Color of `t` in [0, 1] on the chosen scale; out-of-range and NaN input is clamped"]
fn scale_color(scale: ColorScale, t: f64) -> RGBColor {
    let t: f64 = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };

    match scale {
        ColorScale::Viridis => ViridisRGB.get_color_normalized(t, 0.0, 1.0),
        ColorScale::Default => Copper.get_color_normalized(t, 0.0, 1.0),
    }
}

fn normalize(value: f64, min: f64, max: f64) -> f64 {
    if max > min {
        (value - min) / (max - min)
    } else {
        0.5
    }
}

fn min_max<I: Iterator<Item = f64>>(values: I) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    })
}

fn draw_scatter(
    root: &DrawingArea<BitMapBackend, Shift>,
    title: &str,
    chart: &ScatterChart,
) -> anyhow::Result<()> {
    let (x_min, x_max) = padded_range(chart.points().iter().map(|p| p.x));
    let (y_min, y_max) = padded_range(chart.points().iter().map(|p| p.y));
    let (c_min, c_max) = min_max(chart.points().iter().filter_map(|p| p.color));

    let x_unit: Option<SiUnit> = SiUnit::for_column(chart.x_column());
    let y_unit: Option<SiUnit> = SiUnit::for_column(chart.y_column());
    let x_fmt = |v: &f64| format_axis_value(*v, x_unit);
    let y_fmt = |v: &f64| format_axis_value(*v, y_unit);

    let mut ctx = ChartBuilder::on(root)
        .caption(title, ("sans-serif", 32).into_font().color(&TITLE_COLOR))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(100)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

    ctx.configure_mesh()
        .x_desc(chart.x_column().as_str())
        .y_desc(chart.y_column().as_str())
        .axis_style(ShapeStyle::from(&AXIS_COLOR).stroke_width(2))
        .light_line_style(ShapeStyle::from(&GRID_COLOR).stroke_width(1))
        .bold_line_style(ShapeStyle::from(&GRID_COLOR).stroke_width(1))
        .label_style(("sans-serif", 16).into_font().color(&TEXT_COLOR))
        .axis_desc_style(("sans-serif", 20).into_font().color(&TEXT_COLOR))
        .x_label_formatter(&x_fmt)
        .y_label_formatter(&y_fmt)
        .draw()?;

    let scale: ColorScale = *chart.color_scale();

    ctx.draw_series(chart.points().iter().map(|point| {
        let color: RGBColor = match point.color {
            Some(value) => scale_color(scale, normalize(value, c_min, c_max)),
            None => AXIS_COLOR,
        };
        Circle::new((point.x, point.y), 4, color.filled())
    }))?;

    Ok(())
}

fn draw_line(
    root: &DrawingArea<BitMapBackend, Shift>,
    title: &str,
    chart: &LineChart,
) -> anyhow::Result<()> {
    let all_points = || chart.series().iter().flat_map(|s| s.points().iter());

    let (x_min, x_max) = padded_range(all_points().map(|(x, _)| *x));
    let (y_min, y_max) = padded_range(all_points().map(|(_, y)| *y));

    let x_unit: Option<SiUnit> = SiUnit::for_column(chart.x_column());
    let y_unit: Option<SiUnit> = SiUnit::for_column(chart.y_column());
    let x_fmt = |v: &f64| format_axis_value(*v, x_unit);
    let y_fmt = |v: &f64| format_axis_value(*v, y_unit);

    let mut ctx = ChartBuilder::on(root)
        .caption(title, ("sans-serif", 32).into_font().color(&TITLE_COLOR))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(100)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

    ctx.configure_mesh()
        .x_desc(chart.x_column().as_str())
        .y_desc(chart.y_column().as_str())
        .axis_style(ShapeStyle::from(&AXIS_COLOR).stroke_width(2))
        .light_line_style(ShapeStyle::from(&GRID_COLOR).stroke_width(1))
        .bold_line_style(ShapeStyle::from(&GRID_COLOR).stroke_width(1))
        .label_style(("sans-serif", 16).into_font().color(&TEXT_COLOR))
        .axis_desc_style(("sans-serif", 20).into_font().color(&TEXT_COLOR))
        .x_label_formatter(&x_fmt)
        .y_label_formatter(&y_fmt)
        .draw()?;

    for (idx, series) in chart.series().iter().enumerate() {
        let color: RGBColor = SERIES_PALETTE[idx % SERIES_PALETTE.len()];

        ctx.draw_series(LineSeries::new(
            series.points().iter().copied(),
            color.stroke_width(2),
        ))?
        .label(series.label().as_str())
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
    }

    if chart.series().len() > 1 {
        ctx.configure_series_labels()
            .background_style(RGBColor(40, 40, 40).filled())
            .border_style(ShapeStyle::from(&AXIS_COLOR))
            .label_font(("sans-serif", 16).into_font().color(&TEXT_COLOR))
            .draw()?;
    }

    Ok(())
}

fn draw_surface(
    root: &DrawingArea<BitMapBackend, Shift>,
    title: &str,
    chart: &SurfaceChart,
) -> anyhow::Result<()> {
    let rows: usize = chart.grid().len().max(1);
    let cols: usize = chart.z_columns().len().max(1);
    let (z_min, z_max) = min_max(chart.grid().iter().flatten().copied());

    let z_columns: Vec<String> = chart.z_columns().clone();
    let x_fmt = move |v: &f64| {
        let idx: usize = v.floor().max(0.0) as usize;
        z_columns.get(idx).cloned().unwrap_or_default()
    };

    let mut ctx = ChartBuilder::on(root)
        .caption(title, ("sans-serif", 32).into_font().color(&TITLE_COLOR))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(80)
        .build_cartesian_2d(0.0..cols as f64, 0.0..rows as f64)?;

    ctx.configure_mesh()
        .disable_mesh()
        .x_desc("column")
        .y_desc("row")
        .axis_style(ShapeStyle::from(&AXIS_COLOR).stroke_width(2))
        .label_style(("sans-serif", 16).into_font().color(&TEXT_COLOR))
        .axis_desc_style(("sans-serif", 20).into_font().color(&TEXT_COLOR))
        .x_labels(cols * 2)
        .x_label_formatter(&x_fmt)
        .draw()?;

    ctx.draw_series(chart.grid().iter().enumerate().flat_map(|(row, values)| {
        values.iter().enumerate().map(move |(col, value)| {
            let color: RGBColor = scale_color(ColorScale::Viridis, normalize(*value, z_min, z_max));
            Rectangle::new(
                [(col as f64, row as f64), (col as f64 + 1.0, row as f64 + 1.0)],
                color.filled(),
            )
        })
    }))?;

    Ok(())
}

fn draw_histogram(
    root: &DrawingArea<BitMapBackend, Shift>,
    title: &str,
    chart: &HistogramChart,
) -> anyhow::Result<()> {
    let (x_min, x_max) = match (chart.bins().first(), chart.bins().last()) {
        (Some(first), Some(last)) if last.upper > first.lower => (first.lower, last.upper),
        (Some(first), Some(_)) => padded_range(std::iter::once(first.lower)),
        _ => (0.0, 1.0),
    };
    let max_count: u32 = chart
        .bins()
        .iter()
        .map(|b| b.count as u32)
        .max()
        .unwrap_or(0);

    let x_unit: Option<SiUnit> = SiUnit::for_column(chart.column());
    let x_fmt = |v: &f64| format_axis_value(*v, x_unit);

    let mut ctx = ChartBuilder::on(root)
        .caption(title, ("sans-serif", 32).into_font().color(&TITLE_COLOR))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(80)
        .build_cartesian_2d(x_min..x_max, 0u32..max_count + 1)?;

    ctx.configure_mesh()
        .x_desc(chart.column().as_str())
        .y_desc("count")
        .axis_style(ShapeStyle::from(&AXIS_COLOR).stroke_width(2))
        .light_line_style(ShapeStyle::from(&GRID_COLOR).stroke_width(1))
        .bold_line_style(ShapeStyle::from(&GRID_COLOR).stroke_width(1))
        .label_style(("sans-serif", 16).into_font().color(&TEXT_COLOR))
        .axis_desc_style(("sans-serif", 20).into_font().color(&TEXT_COLOR))
        .x_label_formatter(&x_fmt)
        .draw()?;

    let bar_color: RGBColor = SERIES_PALETTE[0];

    ctx.draw_series(chart.bins().iter().map(|bin| {
        /* 단일 버킷(상수 컬럼)은 보이는 폭을 확보 */
        let (lower, upper) = if bin.upper > bin.lower {
            (bin.lower, bin.upper)
        } else {
            (x_min, x_max)
        };
        Rectangle::new([(lower, 0u32), (upper, bin.count as u32)], bar_color.filled())
    }))?;

    Ok(())
}

#[async_trait]
impl ChartService for ChartServiceImpl {
    async fn render_chart(
        &self,
        title: &str,
        chart: &ChartSpec,
        output_path: &Path,
    ) -> anyhow::Result<()> {
        ensure_parent_dir(output_path).await?;

        let kind_label: &'static str = chart.kind().as_str();
        let output_path_buf: PathBuf = output_path.to_path_buf();
        let title: String = title.to_string();
        let chart: ChartSpec = chart.clone();
        let (width, height) = (self.width, self.height);

        let handle: tokio::task::JoinHandle<Result<(), anyhow::Error>> =
            tokio::task::spawn_blocking(move || {
                let root = BitMapBackend::new(&output_path_buf, (width, height)).into_drawing_area();
                root.fill(&BACKGROUND)?;

                match &chart {
                    ChartSpec::Scatter(scatter) => draw_scatter(&root, &title, scatter)?,
                    ChartSpec::Line(line) => draw_line(&root, &title, line)?,
                    ChartSpec::Surface(surface) => draw_surface(&root, &title, surface)?,
                    ChartSpec::Histogram(histogram) => draw_histogram(&root, &title, histogram)?,
                }

                root.present()?;
                Ok(())
            });

        let drawing_result: Result<(), anyhow::Error> = handle.await.context(
            "[ChartServiceImpl->render_chart] blocking task join failed (panic/cancelled)",
        )?;

        drawing_result.context("[ChartServiceImpl->render_chart] drawing/present failed")?;

        info!("{} chart rendered: {:?}", kind_label, output_path);

        Ok(())
    }
}
