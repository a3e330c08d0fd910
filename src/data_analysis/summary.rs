// src/data_analysis/summary.rs

use ndarray_stats::QuantileExt;

use crate::data_analysis::mismatch::MismatchReport;

/// Peak, mean and RMS mismatch of one joint over the window (rad).
#[derive(Debug, Clone, PartialEq)]
pub struct MismatchSummary {
    pub joint: String,
    pub coupled: bool,
    pub samples: usize,
    pub peak: Option<f64>,
    pub mean: Option<f64>,
    pub rms: Option<f64>,
}

/// Summarizes every joint of a report. Joints with no in-window samples get `None` statistics.
pub fn summarize(report: &MismatchReport) -> Vec<MismatchSummary> {
    report
        .joints
        .iter()
        .map(|j| {
            let values = &j.values;
            let peak = values.max().ok().copied();
            let mean = values.mean();
            let rms = values.mapv(|v| v * v).mean().map(f64::sqrt);
            MismatchSummary {
                joint: j.joint.clone(),
                coupled: j.coupled,
                samples: values.len(),
                peak,
                mean,
                rms,
            }
        })
        .collect()
}

/// Joint with the largest peak mismatch, if any joint has samples.
pub fn worst_joint(summaries: &[MismatchSummary]) -> Option<&MismatchSummary> {
    summaries
        .iter()
        .filter(|s| s.peak.is_some_and(f64::is_finite))
        .max_by(|a, b| {
            a.peak
                .unwrap_or(0.0)
                .total_cmp(&b.peak.unwrap_or(0.0))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_analysis::mismatch::JointMismatch;
    use ndarray::Array1;

    fn report() -> MismatchReport {
        MismatchReport {
            times: Array1::from(vec![0.0, 1.0]),
            joints: vec![
                JointMismatch {
                    joint: "WRJ1".to_string(),
                    coupled: false,
                    values: Array1::from(vec![3.0, 4.0]),
                },
                JointMismatch {
                    joint: "FFJ0".to_string(),
                    coupled: true,
                    values: Array1::from(vec![0.0, 8.0]),
                },
            ],
        }
    }

    #[test]
    fn test_summarize_statistics() {
        let summaries = summarize(&report());
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].samples, 2);
        assert_eq!(summaries[0].peak, Some(4.0));
        assert_eq!(summaries[0].mean, Some(3.5));
        let rms = summaries[0].rms.unwrap();
        assert!((rms - 12.5_f64.sqrt()).abs() < 1e-12);
        assert!(summaries[1].coupled);
    }

    #[test]
    fn test_summarize_empty_window() {
        let report = MismatchReport {
            times: Array1::from(Vec::<f64>::new()),
            joints: vec![JointMismatch {
                joint: "THJ1".to_string(),
                coupled: false,
                values: Array1::from(Vec::<f64>::new()),
            }],
        };
        let summaries = summarize(&report);
        assert_eq!(summaries[0].samples, 0);
        assert_eq!(summaries[0].peak, None);
        assert_eq!(summaries[0].mean, None);
        assert!(worst_joint(&summaries).is_none());
    }

    #[test]
    fn test_worst_joint() {
        let summaries = summarize(&report());
        assert_eq!(worst_joint(&summaries).unwrap().joint, "FFJ0");
    }
}
