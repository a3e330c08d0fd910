// src/plot_functions/plot_coupled_mismatch.rs

use std::error::Error;
use std::path::Path;

use crate::config::{ColorMode, OutputFormat};
use crate::constants::{COLOR_COUPLED, COLOR_UNCOUPLED, LINE_WIDTH_PLOT, PLOT_HEIGHT, PLOT_WIDTH};
use crate::data_analysis::mismatch::MismatchReport;
use crate::plot_framework::{
    chart_ranges, distinct_color, render_plot, time_series_points, LineStyle, PlotConfig,
    PlotSeries,
};

pub const COUPLED_MISMATCH_FILE: &str = "coupled_mismatch";

/// Builds the coupled-vs-uncoupled mismatch chart.
///
/// `ColorMode::Same` colors by coupling class and adds one legend entry per class;
/// `ColorMode::Distinct` gives every joint its own color and legend entry.
pub fn build_coupled_mismatch_config(
    report: &MismatchReport,
    color_mode: ColorMode,
    title: Option<&str>,
) -> PlotConfig {
    let count = report.joints.len();
    let mut series: Vec<PlotSeries> = report
        .joints
        .iter()
        .enumerate()
        .map(|(index, joint)| {
            let (color, label) = match color_mode {
                ColorMode::Same if joint.coupled => (COLOR_COUPLED, String::new()),
                ColorMode::Same => (COLOR_UNCOUPLED, String::new()),
                ColorMode::Distinct => (distinct_color(index, count), joint.joint.clone()),
            };
            PlotSeries {
                data: time_series_points(&report.times, &joint.values),
                label,
                color,
                stroke_width: LINE_WIDTH_PLOT,
                line_style: LineStyle::Solid,
            }
        })
        .collect();

    let (x_range, y_range) = chart_ranges(&series, true);

    if color_mode == ColorMode::Same {
        for (label, color) in [("coupled", COLOR_COUPLED), ("uncoupled", COLOR_UNCOUPLED)] {
            series.push(PlotSeries {
                data: Vec::new(),
                label: label.to_string(),
                color,
                stroke_width: LINE_WIDTH_PLOT,
                line_style: LineStyle::Solid,
            });
        }
    }

    PlotConfig {
        plot_type: "Coupled Mismatch".to_string(),
        title: title.map(str::to_string),
        x_range,
        y_range,
        series,
        x_label: "Time [s]".to_string(),
        y_label: "Mismatch (|cmd - state|) [rad]".to_string(),
        width: PLOT_WIDTH,
        height: PLOT_HEIGHT,
    }
}

/// Generates the coupled vs uncoupled mismatch plot.
pub fn plot_coupled_mismatch(
    report: &MismatchReport,
    output_path: &Path,
    format: OutputFormat,
    color_mode: ColorMode,
    title: Option<&str>,
) -> Result<(), Box<dyn Error>> {
    let plot_config = build_coupled_mismatch_config(report, color_mode, title);
    render_plot(output_path, format, &plot_config)
}
