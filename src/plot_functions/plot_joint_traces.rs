// src/plot_functions/plot_joint_traces.rs

use std::error::Error;
use std::path::Path;

use tracing::error;

use crate::config::OutputFormat;
use crate::constants::{
    COLOR_COMMAND, COLOR_STATE, COLOR_TRACE_MISMATCH, JOINT_PLOT_HEIGHT, JOINT_PLOT_WIDTH,
    LINE_WIDTH_PLOT,
};
use crate::data_analysis::mismatch::JointTrace;
use crate::plot_framework::{
    chart_ranges, render_plot, time_series_points, LineStyle, PlotConfig, PlotSeries,
};
use crate::plot_functions::output_path;

/// Builds the command (dashed), state (solid) and mismatch (dotted) chart of one joint.
pub fn build_joint_trace_config(trace: &JointTrace, title: Option<&str>) -> PlotConfig {
    let series = vec![
        PlotSeries {
            data: time_series_points(&trace.times, &trace.command),
            label: "Command".to_string(),
            color: COLOR_COMMAND,
            stroke_width: LINE_WIDTH_PLOT,
            line_style: LineStyle::Dashed,
        },
        PlotSeries {
            data: time_series_points(&trace.times, &trace.state),
            label: "State".to_string(),
            color: COLOR_STATE,
            stroke_width: LINE_WIDTH_PLOT,
            line_style: LineStyle::Solid,
        },
        PlotSeries {
            data: time_series_points(&trace.times, &trace.mismatch),
            label: "Mismatch".to_string(),
            color: COLOR_TRACE_MISMATCH,
            stroke_width: LINE_WIDTH_PLOT,
            line_style: LineStyle::Dotted,
        },
    ];

    let (x_range, y_range) = chart_ranges(&series, false);
    PlotConfig {
        plot_type: format!("{} Trace", trace.joint),
        title: title.map(|t| format!("{t} - {}", trace.joint)),
        x_range,
        y_range,
        series,
        x_label: "Time [s]".to_string(),
        y_label: "Value [rad]".to_string(),
        width: JOINT_PLOT_WIDTH,
        height: JOINT_PLOT_HEIGHT,
    }
}

/// Generates one trace plot per joint, named `<prefix>_<joint><suffix>.<ext>`.
///
/// A failure on one joint is logged and does not stop the others; the number of
/// failed joints is returned as an error at the end.
pub fn plot_joint_traces(
    traces: &[JointTrace],
    output_dir: &Path,
    prefix: Option<&str>,
    file_suffix: &str,
    format: OutputFormat,
    title: Option<&str>,
) -> Result<(), Box<dyn Error>> {
    let mut failures = 0;
    for trace in traces {
        let base = format!("{}{}", trace.joint, file_suffix);
        let path = output_path(output_dir, prefix, &base, format);
        let plot_config = build_joint_trace_config(trace, title);
        if let Err(e) = render_plot(&path, format, &plot_config) {
            error!("  Failed to render '{}': {}", path.display(), e);
            failures += 1;
        }
    }
    if failures > 0 {
        return Err(format!("{failures} of {} joint trace plots failed", traces.len()).into());
    }
    Ok(())
}
