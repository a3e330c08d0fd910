// src/plot_framework.rs

use plotters::backend::{BitMapBackend, DrawingBackend, SVGBackend};
use plotters::chart::{ChartBuilder, SeriesLabelPosition};
use plotters::coord::Shift;
use plotters::drawing::{DrawingArea, IntoDrawingArea};
use plotters::element::{Circle, PathElement, Text};
use plotters::series::{DashedLineSeries, LineSeries};
use plotters::style::colors::{BLACK, RED, WHITE};
use plotters::style::{Color, IntoFont, RGBColor};

use ndarray::Array1;

use std::error::Error;
use std::ops::Range;
use std::path::Path;

use tracing::info;

use crate::config::OutputFormat;
use crate::constants::{
    DASH_GAP_PX, DASH_LENGTH_PX, DOT_GAP_PX, DOT_LENGTH_PX, FONT_SIZE_MESSAGE, LINE_WIDTH_LEGEND,
};
use crate::font_config::{
    FONT_TUPLE_AXIS_LABEL, FONT_TUPLE_CHART_TITLE, FONT_TUPLE_LEGEND, FONT_TUPLE_MESSAGE,
};
use crate::types::TimeSeriesPoints;

/// Calculate plot range with padding.
/// Adds 15% padding, or a fixed padding for very small ranges.
pub fn calculate_range(min_val: f64, max_val: f64) -> (f64, f64) {
    let (min, max) = if min_val <= max_val {
        (min_val, max_val)
    } else {
        (max_val, min_val)
    };
    let range = (max - min).abs();
    let padding = if range < 1e-6 { 0.5 } else { range * 0.15 };
    (min - padding, max + padding)
}

/// Range for a non-negative quantity: starts at zero, padded above the maximum.
pub fn calculate_magnitude_range(max_val: f64) -> (f64, f64) {
    let max = max_val.max(0.0);
    let padding = if max < 1e-6 { 0.1 } else { max * 0.1 };
    (0.0, max + padding)
}

/// X and Y extents of every point in `series`, or `None` if no series has finite data.
pub fn series_bounds(series: &[PlotSeries]) -> Option<(Range<f64>, Range<f64>)> {
    let mut x_min = f64::INFINITY;
    let mut x_max = f64::NEG_INFINITY;
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    for &(x, y) in series.iter().flat_map(|s| s.data.iter()) {
        if !x.is_finite() || !y.is_finite() {
            continue;
        }
        x_min = x_min.min(x);
        x_max = x_max.max(x);
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }
    if x_min > x_max {
        return None;
    }
    Some((x_min..x_max, y_min..y_max))
}

/// Axis ranges for a time-series chart. `non_negative` pins the value axis at zero.
/// Returns empty ranges when there is nothing to plot.
pub fn chart_ranges(series: &[PlotSeries], non_negative: bool) -> (Range<f64>, Range<f64>) {
    let Some((x, y)) = series_bounds(series) else {
        return (0.0..0.0, 0.0..0.0);
    };
    let x_range = if x.end - x.start < 1e-9 {
        let (lo, hi) = calculate_range(x.start, x.end);
        lo..hi
    } else {
        x
    };
    let (y_lo, y_hi) = if non_negative {
        calculate_magnitude_range(y.end)
    } else {
        calculate_range(y.start, y.end)
    };
    (x_range, y_lo..y_hi)
}

/// Pairs each elapsed time with its value.
pub fn time_series_points(times: &Array1<f64>, values: &Array1<f64>) -> TimeSeriesPoints {
    times.iter().copied().zip(values.iter().copied()).collect()
}

/// Color for series `index` of `count` when every series gets its own color.
/// Uses the ten-color categorical palette while it suffices, then spreads along Turbo.
pub fn distinct_color(index: usize, count: usize) -> RGBColor {
    let color = if count <= colorous::CATEGORY10.len() {
        colorous::CATEGORY10[index % colorous::CATEGORY10.len()]
    } else {
        colorous::TURBO.eval_rational(index, count)
    };
    RGBColor(color.r, color.g, color.b)
}

/// Tick label for a value axis. Radian-scale values keep two or three decimals.
pub fn format_axis_value(y: f64) -> String {
    if y.abs() >= 1000.0 {
        format!("{:.1}k", y / 1000.0)
    } else if y.fract() == 0.0 {
        format!("{:.0}", y)
    } else if y.abs() < 0.1 {
        format!("{:.3}", y)
    } else {
        format!("{:.2}", y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

#[derive(Debug, Clone)]
pub struct PlotSeries {
    pub data: TimeSeriesPoints,
    /// Empty label: drawn without a legend entry. Empty data with a label: legend entry only.
    pub label: String,
    pub color: RGBColor,
    pub stroke_width: u32,
    pub line_style: LineStyle,
}

#[derive(Debug, Clone)]
pub struct PlotConfig {
    /// Used in log messages and placeholders.
    pub plot_type: String,
    pub title: Option<String>,
    pub x_range: Range<f64>,
    pub y_range: Range<f64>,
    pub series: Vec<PlotSeries>,
    pub x_label: String,
    pub y_label: String,
    pub width: u32,
    pub height: u32,
}

impl PlotConfig {
    pub fn has_data(&self) -> bool {
        self.series.iter().any(|s| !s.data.is_empty())
    }

    pub fn has_valid_ranges(&self) -> bool {
        self.x_range.end > self.x_range.start && self.y_range.end > self.y_range.start
    }

    /// Labels that will show up in the legend, in drawing order.
    pub fn legend_labels(&self) -> Vec<&str> {
        self.series
            .iter()
            .filter(|s| !s.label.is_empty())
            .map(|s| s.label.as_str())
            .collect()
    }
}

/// Draw a "Data Unavailable" message on a plot area.
pub fn draw_unavailable_message<DB>(
    area: &DrawingArea<DB, Shift>,
    plot_type: &str,
    reason: &str,
) -> Result<(), Box<dyn Error>>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    const CHAR_WIDTH_RATIO: f32 = 0.6; // Approximate character width relative to font size
    const LINE_HEIGHT_SPACING: i32 = 4;

    let (x_range, y_range) = area.get_pixel_range();
    let (width, height) = (
        (x_range.end - x_range.start) as u32,
        (y_range.end - y_range.start) as u32,
    );
    let message = format!("{plot_type} Data Unavailable:\n{reason}");

    let estimated_char_width = (FONT_SIZE_MESSAGE as f32 * CHAR_WIDTH_RATIO) as i32;
    let estimated_line_height = FONT_SIZE_MESSAGE + LINE_HEIGHT_SPACING;

    let lines: Vec<&str> = message.split('\n').collect();
    let max_line_length = lines.iter().map(|line| line.len()).max().unwrap_or(0);
    let estimated_text_width = max_line_length.saturating_mul(estimated_char_width as usize) as i32;
    let estimated_text_height = lines.len().saturating_mul(estimated_line_height as usize) as i32;

    let center_x = width as i32 / 2 - estimated_text_width / 2;
    let center_y = height as i32 / 2 - estimated_text_height / 2;

    let text_style = FONT_TUPLE_MESSAGE.into_font().color(&RED);
    area.draw(&Text::new(message, (center_x, center_y), text_style))?;
    Ok(())
}

/// Draws one line chart filling `area`.
fn draw_line_chart<DB>(area: &DrawingArea<DB, Shift>, plot_config: &PlotConfig) -> Result<(), Box<dyn Error>>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    // Chart frame: margins and label areas sized for the large axis fonts
    let mut builder = ChartBuilder::on(area);
    builder.margin(15).x_label_area_size(70).y_label_area_size(100);
    if let Some(title) = &plot_config.title {
        builder.caption(title, FONT_TUPLE_CHART_TITLE);
    }
    // Ranges come precomputed from the chart builders
    let mut chart =
        builder.build_cartesian_2d(plot_config.x_range.clone(), plot_config.y_range.clone())?;

    // Mesh, axis descriptions and tick labels
    chart
        .configure_mesh()
        .x_desc(&plot_config.x_label)
        .y_desc(&plot_config.y_label)
        .x_labels(10)
        .y_labels(8)
        .y_label_formatter(&|y: &f64| format_axis_value(*y))
        .light_line_style(WHITE.mix(0.7))
        .label_style(FONT_TUPLE_AXIS_LABEL)
        .axis_desc_style(FONT_TUPLE_AXIS_LABEL)
        .draw()?;

    let mut legend_series_count = 0;

    for s in &plot_config.series {
        let color = s.color;

        // Legend-only series: an invisible point carries the legend entry.
        if s.data.is_empty() {
            if !s.label.is_empty() {
                chart
                    .draw_series(std::iter::once(Circle::new(
                        (plot_config.x_range.start, plot_config.y_range.start),
                        0,
                        color.filled(),
                    )))?
                    .label(s.label.as_str())
                    .legend(move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(LINE_WIDTH_LEGEND))
                    });
                legend_series_count += 1;
            }
            continue;
        }

        // Command traces are dashed and mismatch traces dotted so they stay
        // distinguishable where the lines overlap
        let style = color.stroke_width(s.stroke_width);
        let annotation = match s.line_style {
            LineStyle::Solid => chart.draw_series(LineSeries::new(s.data.iter().copied(), style))?,
            LineStyle::Dashed => chart.draw_series(DashedLineSeries::new(
                s.data.clone(),
                DASH_LENGTH_PX,
                DASH_GAP_PX,
                style,
            ))?,
            LineStyle::Dotted => chart.draw_series(DashedLineSeries::new(
                s.data.clone(),
                DOT_LENGTH_PX,
                DOT_GAP_PX,
                style,
            ))?,
        };

        // Unlabelled series are drawn but kept out of the legend
        if !s.label.is_empty() {
            annotation.label(s.label.as_str()).legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(LINE_WIDTH_LEGEND))
            });
            legend_series_count += 1;
        }
    }

    // Only draw the legend box if something registered an entry
    if legend_series_count > 0 {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font(FONT_TUPLE_LEGEND)
            .draw()?;
    }

    Ok(())
}

/// Fills `root`, draws the chart (or a placeholder) and flushes the backend.
/// Returns whether any data was plotted.
fn draw_plot_on<DB>(root: &DrawingArea<DB, Shift>, plot_config: &PlotConfig) -> Result<bool, Box<dyn Error>>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;
    // Empty windows and degenerate ranges still produce a file, with a placeholder
    let plotted = plot_config.has_data() && plot_config.has_valid_ranges();
    if plotted {
        draw_line_chart(root, plot_config)?;
    } else {
        let reason = if !plot_config.has_data() {
            "No data points in the analysis window"
        } else {
            "Invalid ranges"
        };
        draw_unavailable_message(root, &plot_config.plot_type, reason)?;
    }
    // Flush to disk; SVG and bitmap backends only write here
    root.present()?;
    Ok(plotted)
}

/// Renders `plot_config` to `output_path` with the backend matching `format`.
pub fn render_plot(
    output_path: &Path,
    format: OutputFormat,
    plot_config: &PlotConfig,
) -> Result<(), Box<dyn Error>> {
    let size = (plot_config.width, plot_config.height);
    // Backends differ in type, so each arm builds and draws its own root area
    let plotted = match format {
        OutputFormat::Svg => {
            let root = SVGBackend::new(output_path, size).into_drawing_area();
            draw_plot_on(&root, plot_config)?
        }
        OutputFormat::Png => {
            let root = BitMapBackend::new(output_path, size).into_drawing_area();
            draw_plot_on(&root, plot_config)?
        }
    };

    if plotted {
        info!("  {} plot saved as '{}'.", plot_config.plot_type, output_path.display());
    } else {
        info!(
            "  {} plot saved as '{}' with a placeholder: no data available to plot.",
            plot_config.plot_type,
            output_path.display()
        );
    }
    Ok(())
}
