// src/data_analysis/mismatch.rs

use ndarray::Array1;

use crate::data_input::log_data::SampleTable;
use crate::error::{MismatchError, Result};
use crate::joint_names::{JointTopology, TopologyEntry};
use crate::types::MismatchSeries;

/// Mismatch series of one joint, tagged with whether it is a coupled virtual joint.
#[derive(Debug, Clone, PartialEq)]
pub struct JointMismatch {
    pub joint: String,
    pub coupled: bool,
    pub values: MismatchSeries,
}

/// Windowed mismatch of every joint in a topology, in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct MismatchReport {
    /// Elapsed time (s) of each in-window sample.
    pub times: Array1<f64>,
    pub joints: Vec<JointMismatch>,
}

impl MismatchReport {
    pub fn get(&self, joint: &str) -> Option<&MismatchSeries> {
        self.joints
            .iter()
            .find(|j| j.joint == joint)
            .map(|j| &j.values)
    }

    pub fn joint_ids(&self) -> impl Iterator<Item = &str> {
        self.joints.iter().map(|j| j.joint.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }
}

/// Command, state and mismatch of one joint over the window.
#[derive(Debug, Clone, PartialEq)]
pub struct JointTrace {
    pub joint: String,
    pub times: Array1<f64>,
    pub command: Array1<f64>,
    pub state: Array1<f64>,
    pub mismatch: MismatchSeries,
}

/// Re-zeroes the timestamps so the first sample sits at exactly 0.0.
pub fn normalize_time(table: &SampleTable) -> Result<Array1<f64>> {
    let times = table.timestamps()?;
    let first = *times.get(0).ok_or(MismatchError::EmptyTable)?;
    Ok(times.mapv(|t| t - first))
}

/// Selects samples with `t_start <= t <= t_end`. An inverted window selects nothing.
pub fn window_mask(times: &Array1<f64>, t_start: f64, t_end: f64) -> Vec<bool> {
    times.iter().map(|&t| t_start <= t && t <= t_end).collect()
}

/// `|cmd - state|` of `joint` for every masked row.
pub fn independent_mismatch(table: &SampleTable, joint: &str, mask: &[bool]) -> Result<MismatchSeries> {
    let (cmd, state) = table.joint_columns(joint)?;
    let diff = (cmd - state).mapv(f64::abs);
    select_masked(&diff, mask)
}

/// `|(cmd_j1 + cmd_j2) - (state_j1 + state_j2)|` for every masked row.
///
/// One actuator drives both joints, so only the summed motion is constrained.
/// This is the mismatch of the sums, which is smaller than the sum of the
/// individual mismatches whenever the two errors have opposite sign.
pub fn coupled_mismatch(table: &SampleTable, j1: &str, j2: &str, mask: &[bool]) -> Result<MismatchSeries> {
    let (command, state) = coupled_columns(table, j1, j2)?;
    let diff = (&command - &state).mapv(f64::abs);
    select_masked(&diff, mask)
}

/// Computes the windowed mismatch of every topology entry.
pub fn compute_all(
    table: &SampleTable,
    topology: &JointTopology,
    t_start: f64,
    t_end: f64,
) -> Result<MismatchReport> {
    let times = normalize_time(table)?;
    let mask = window_mask(&times, t_start, t_end);
    let windowed_times = select_masked(&times, &mask)?;

    let mut joints = Vec::with_capacity(topology.len());
    for entry in topology.entries() {
        let values = match entry {
            TopologyEntry::Independent(joint) => independent_mismatch(table, joint, &mask)?,
            TopologyEntry::Coupled { joints: [j1, j2], .. } => coupled_mismatch(table, j1, j2, &mask)?,
        };
        joints.push(JointMismatch {
            joint: entry.id().to_string(),
            coupled: entry.is_coupled(),
            values,
        });
    }

    Ok(MismatchReport {
        times: windowed_times,
        joints,
    })
}

/// Windowed command, state and mismatch for each topology entry.
///
/// Coupled entries are traced through their summed command and state.
pub fn compute_traces(
    table: &SampleTable,
    topology: &JointTopology,
    t_start: f64,
    t_end: f64,
) -> Result<Vec<JointTrace>> {
    let times = normalize_time(table)?;
    let mask = window_mask(&times, t_start, t_end);
    let windowed_times = select_masked(&times, &mask)?;

    topology
        .entries()
        .iter()
        .map(|entry| -> Result<JointTrace> {
            let (command, state) = match entry {
                TopologyEntry::Independent(joint) => {
                    let (cmd, state) = table.joint_columns(joint)?;
                    (cmd.clone(), state.clone())
                }
                TopologyEntry::Coupled { joints: [j1, j2], .. } => coupled_columns(table, j1, j2)?,
            };
            let command = select_masked(&command, &mask)?;
            let state = select_masked(&state, &mask)?;
            let mismatch = (&command - &state).mapv(f64::abs);
            Ok(JointTrace {
                joint: entry.id().to_string(),
                times: windowed_times.clone(),
                command,
                state,
                mismatch,
            })
        })
        .collect()
}

fn coupled_columns(table: &SampleTable, j1: &str, j2: &str) -> Result<(Array1<f64>, Array1<f64>)> {
    let (cmd_1, state_1) = table.joint_columns(j1)?;
    let (cmd_2, state_2) = table.joint_columns(j2)?;
    Ok((cmd_1 + cmd_2, state_1 + state_2))
}

fn select_masked(values: &Array1<f64>, mask: &[bool]) -> Result<Array1<f64>> {
    if values.len() != mask.len() {
        return Err(MismatchError::MaskLengthMismatch {
            expected: values.len(),
            actual: mask.len(),
        });
    }
    Ok(values
        .iter()
        .zip(mask)
        .filter_map(|(&v, &keep)| keep.then_some(v))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp_table() -> SampleTable {
        SampleTable::from_columns(vec![
            ("Timestamp", vec![0.0, 1.0, 2.0, 3.0]),
            ("cmd_FFJ1", vec![0.0, 1.0, 2.0, 3.0]),
            ("state_FFJ1", vec![0.0, 1.0, 1.0, 3.0]),
            ("cmd_FFJ2", vec![0.5, -0.5, 0.0, 1.0]),
            ("state_FFJ2", vec![0.0, 0.0, 0.5, 1.5]),
        ])
    }

    #[test]
    fn test_normalize_time_starts_at_zero() {
        let table = SampleTable::from_columns(vec![("Timestamp", vec![1_700_000_000.25, 1_700_000_000.75])]);
        let times = normalize_time(&table).unwrap();
        assert_eq!(times[0], 0.0);
        assert!((times[1] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_normalize_time_empty_table() {
        let table = SampleTable::from_columns(vec![("Timestamp", Vec::<f64>::new())]);
        assert!(matches!(normalize_time(&table), Err(MismatchError::EmptyTable)));
    }

    #[test]
    fn test_normalize_time_rejects_non_finite_start() {
        let table = SampleTable::from_columns(vec![("Timestamp", vec![f64::NAN, 1.0])]);
        assert!(matches!(
            normalize_time(&table),
            Err(MismatchError::DataFormat { row: 1, .. })
        ));
    }

    #[test]
    fn test_window_mask_inclusive_bounds() {
        let times = Array1::from(vec![0.0, 1.0, 2.0, 3.0]);
        assert_eq!(window_mask(&times, 1.0, 2.0), vec![false, true, true, false]);
    }

    #[test]
    fn test_window_mask_single_instant() {
        let times = Array1::from(vec![0.0, 1.0, 1.0, 2.0]);
        assert_eq!(window_mask(&times, 1.0, 1.0), vec![false, true, true, false]);
    }

    #[test]
    fn test_window_mask_inverted_is_empty() {
        let times = Array1::from(vec![0.0, 1.0, 2.0, 3.0]);
        assert!(window_mask(&times, 2.5, 0.5).iter().all(|&m| !m));
    }

    #[test]
    fn test_independent_mismatch_scenario() {
        let table = ramp_table();
        let report = {
            let mut topology = JointTopology::new();
            topology.push_independent("FFJ1");
            compute_all(&table, &topology, 1.0, 2.0).unwrap()
        };
        assert_eq!(report.times.to_vec(), vec![1.0, 2.0]);
        assert_eq!(report.get("FFJ1").unwrap().to_vec(), vec![0.0, 1.0]);
    }

    #[test]
    fn test_independent_mismatch_non_negative_and_zero_on_match() {
        let table = ramp_table();
        let mask = vec![true; 4];
        let values = independent_mismatch(&table, "FFJ2", &mask).unwrap();
        assert!(values.iter().all(|&v| v >= 0.0));
        let ffj1 = independent_mismatch(&table, "FFJ1", &mask).unwrap();
        assert_eq!(ffj1[0], 0.0);
        assert_eq!(ffj1[3], 0.0);
    }

    #[test]
    fn test_independent_mismatch_missing_column() {
        let table = ramp_table();
        let err = independent_mismatch(&table, "MFJ3", &[true; 4]).unwrap_err();
        match err {
            MismatchError::MissingColumn { column, joint } => {
                assert_eq!(column, "cmd_MFJ3");
                assert_eq!(joint.as_deref(), Some("MFJ3"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_mask_length_mismatch() {
        let table = ramp_table();
        assert!(matches!(
            independent_mismatch(&table, "FFJ1", &[true, false]),
            Err(MismatchError::MaskLengthMismatch { expected: 4, actual: 2 })
        ));
    }

    #[test]
    fn test_coupled_mismatch_sums_before_differencing() {
        let table = SampleTable::from_columns(vec![
            ("Timestamp", vec![0.0]),
            ("cmd_FFJ1", vec![1.0]),
            ("cmd_FFJ2", vec![0.0]),
            ("state_FFJ1", vec![0.0]),
            ("state_FFJ2", vec![0.0]),
        ]);
        let coupled = coupled_mismatch(&table, "FFJ1", "FFJ2", &[true]).unwrap();
        assert_eq!(coupled.to_vec(), vec![1.0]);
    }

    #[test]
    fn test_coupled_mismatch_differs_from_sum_of_individual() {
        let table = SampleTable::from_columns(vec![
            ("Timestamp", vec![0.0]),
            ("cmd_FFJ1", vec![1.0]),
            ("cmd_FFJ2", vec![0.0]),
            ("state_FFJ1", vec![0.0]),
            ("state_FFJ2", vec![1.0]),
        ]);
        let mask = [true];
        let coupled = coupled_mismatch(&table, "FFJ1", "FFJ2", &mask).unwrap();
        let individual = independent_mismatch(&table, "FFJ1", &mask).unwrap()
            + independent_mismatch(&table, "FFJ2", &mask).unwrap();
        assert_eq!(coupled[0], 0.0);
        assert_eq!(individual[0], 2.0);
    }

    #[test]
    fn test_coupled_mismatch_symmetric() {
        let table = ramp_table();
        let mask = vec![true, false, true, true];
        let a = coupled_mismatch(&table, "FFJ1", "FFJ2", &mask).unwrap();
        let b = coupled_mismatch(&table, "FFJ2", "FFJ1", &mask).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 3);
    }

    #[test]
    fn test_compute_all_preserves_declaration_order() {
        let table = ramp_table();
        let mut topology = JointTopology::new();
        topology.push_coupled("FFJ0", "FFJ1", "FFJ2").push_independent("FFJ2").push_independent("FFJ1");
        let report = compute_all(&table, &topology, 0.0, 10.0).unwrap();
        let ids: Vec<&str> = report.joint_ids().collect();
        assert_eq!(ids, vec!["FFJ0", "FFJ2", "FFJ1"]);
        assert!(report.joints[0].coupled);
        assert!(!report.joints[1].coupled);
    }

    #[test]
    fn test_compute_all_idempotent() {
        let table = ramp_table();
        let mut topology = JointTopology::new();
        topology.push_independent("FFJ1").push_coupled("FFJ0", "FFJ1", "FFJ2");
        let first = compute_all(&table, &topology, 0.5, 2.5).unwrap();
        let second = compute_all(&table, &topology, 0.5, 2.5).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_compute_all_inverted_window_is_empty() {
        let table = ramp_table();
        let mut topology = JointTopology::new();
        topology.push_independent("FFJ1");
        let report = compute_all(&table, &topology, 3.0, 1.0).unwrap();
        assert!(report.is_empty());
        assert!(report.get("FFJ1").unwrap().is_empty());
    }

    #[test]
    fn test_compute_traces_coupled_uses_sums() {
        let table = ramp_table();
        let mut topology = JointTopology::new();
        topology.push_coupled("FFJ0", "FFJ1", "FFJ2");
        let traces = compute_traces(&table, &topology, 0.0, 0.0).unwrap();
        assert_eq!(traces.len(), 1);
        assert_eq!(traces[0].command.to_vec(), vec![0.5]);
        assert_eq!(traces[0].state.to_vec(), vec![0.0]);
        assert_eq!(traces[0].mismatch.to_vec(), vec![0.5]);
    }
}
