// src/plot_functions/plot_overall_mismatch.rs

use std::error::Error;
use std::path::Path;

use crate::config::OutputFormat;
use crate::constants::{LINE_WIDTH_PLOT, PLOT_HEIGHT, PLOT_WIDTH};
use crate::data_analysis::mismatch::MismatchReport;
use crate::plot_framework::{
    chart_ranges, distinct_color, render_plot, time_series_points, LineStyle, PlotConfig,
    PlotSeries,
};

pub const OVERALL_MISMATCH_FILE: &str = "overall_mismatch";

/// Builds the overlay chart with one mismatch line per joint.
///
/// Only joints in `legend_joints` get a legend entry; an empty list labels every joint.
pub fn build_overall_mismatch_config(
    report: &MismatchReport,
    legend_joints: &[String],
    title: Option<&str>,
) -> PlotConfig {
    let count = report.joints.len();
    let series: Vec<PlotSeries> = report
        .joints
        .iter()
        .enumerate()
        .map(|(index, joint)| {
            let show_in_legend =
                legend_joints.is_empty() || legend_joints.iter().any(|l| *l == joint.joint);
            PlotSeries {
                data: time_series_points(&report.times, &joint.values),
                label: if show_in_legend { joint.joint.clone() } else { String::new() },
                color: distinct_color(index, count),
                stroke_width: LINE_WIDTH_PLOT,
                line_style: LineStyle::Solid,
            }
        })
        .collect();

    let (x_range, y_range) = chart_ranges(&series, true);
    PlotConfig {
        plot_type: "Overall Mismatch".to_string(),
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

/// Generates the overlay plot of every joint's mismatch.
pub fn plot_overall_mismatch(
    report: &MismatchReport,
    output_path: &Path,
    format: OutputFormat,
    legend_joints: &[String],
    title: Option<&str>,
) -> Result<(), Box<dyn Error>> {
    let plot_config = build_overall_mismatch_config(report, legend_joints, title);
    render_plot(output_path, format, &plot_config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_analysis::mismatch::JointMismatch;
    use ndarray::Array1;

    fn report() -> MismatchReport {
        let joints = ["WRJ1", "WRJ2", "FFJ1"]
            .iter()
            .map(|j| JointMismatch {
                joint: j.to_string(),
                coupled: false,
                values: Array1::from(vec![0.1, 0.2]),
            })
            .collect();
        MismatchReport {
            times: Array1::from(vec![1.0, 1.5]),
            joints,
        }
    }

    #[test]
    fn test_legend_filtered_to_requested_joints() {
        let legend = vec!["WRJ1".to_string(), "WRJ2".to_string()];
        let config = build_overall_mismatch_config(&report(), &legend, None);
        assert_eq!(config.series.len(), 3);
        assert_eq!(config.legend_labels(), vec!["WRJ1", "WRJ2"]);
    }

    #[test]
    fn test_empty_legend_list_labels_every_joint() {
        let config = build_overall_mismatch_config(&report(), &[], Some("Hand moving"));
        assert_eq!(config.legend_labels(), vec!["WRJ1", "WRJ2", "FFJ1"]);
        assert_eq!(config.title.as_deref(), Some("Hand moving"));
    }

    #[test]
    fn test_series_points_and_ranges() {
        let config = build_overall_mismatch_config(&report(), &[], None);
        assert_eq!(config.series[0].data, vec![(1.0, 0.1), (1.5, 0.2)]);
        assert_eq!(config.x_range, 1.0..1.5);
        assert_eq!(config.y_range.start, 0.0);
        assert!(config.has_valid_ranges());
    }

    #[test]
    fn test_empty_window_has_no_plottable_data() {
        let report = MismatchReport {
            times: Array1::from(Vec::<f64>::new()),
            joints: vec![JointMismatch {
                joint: "WRJ1".to_string(),
                coupled: false,
                values: Array1::from(Vec::<f64>::new()),
            }],
        };
        let config = build_overall_mismatch_config(&report, &[], None);
        assert!(!config.has_data());
        assert!(!config.has_valid_ranges());
    }
}
