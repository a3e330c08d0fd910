// src/data_input/log_parser.rs

use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use ndarray::Array1;
use tracing::{debug, info, warn};

use crate::data_input::log_data::{ColumnData, SampleTable};
use crate::error::{MismatchError, Result};
use crate::joint_names::{is_known_joint, state_column, TIMESTAMP_COLUMN};

/// Parses a joint log CSV file into a [`SampleTable`].
///
/// Timestamps are multiplied by `timestamp_scale` so logs recorded in ticks can be
/// brought to seconds (e.g. `1e-9` for nanoseconds).
pub fn parse_log_file(input_file_path: &Path, timestamp_scale: f64) -> Result<SampleTable> {
    info!("Reading joint log '{}'", input_file_path.display());
    let file = File::open(input_file_path)?;
    parse_log_reader(BufReader::new(file), timestamp_scale)
}

/// Parses joint log CSV content from any reader.
pub fn parse_log_reader<R: Read>(reader: R, timestamp_scale: f64) -> Result<SampleTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    debug!("Headers found in CSV: {:?}", headers);

    if !headers.iter().any(|h| h == TIMESTAMP_COLUMN) {
        return Err(MismatchError::MissingColumn {
            column: TIMESTAMP_COLUMN.to_string(),
            joint: None,
        });
    }
    report_header_status(&headers);

    let mut values: Vec<Vec<f64>> = vec![Vec::new(); headers.len()];
    let mut malformed: Vec<Option<(usize, String)>> = vec![None; headers.len()];
    let mut row_count = 0;

    for result in reader.records() {
        let record = result?;
        row_count += 1;
        for (col_idx, cell) in record.iter().enumerate().take(headers.len()) {
            if malformed[col_idx].is_some() {
                continue;
            }
            match cell.parse::<f64>() {
                Ok(v) => values[col_idx].push(v),
                Err(_) => malformed[col_idx] = Some((row_count, cell.to_string())),
            }
        }
    }
    info!("Finished reading {} data rows.", row_count);

    let mut columns = HashMap::with_capacity(headers.len());
    let mut unique_headers = Vec::with_capacity(headers.len());
    for ((name, column_values), bad_cell) in headers.iter().zip(values).zip(malformed) {
        // First occurrence wins; later copies of a header are ignored.
        if columns.contains_key(name) {
            warn!("Duplicate column '{}' in header; keeping the first occurrence", name);
            continue;
        }
        let data = match bad_cell {
            Some((row, value)) => {
                debug!("Column '{}' has non-numeric value '{}' at row {}", name, value, row);
                ColumnData::Malformed { row, value }
            }
            None if name == TIMESTAMP_COLUMN => {
                ColumnData::Numeric(Array1::from(column_values) * timestamp_scale)
            }
            None => ColumnData::Numeric(Array1::from(column_values)),
        };
        columns.insert(name.clone(), data);
        unique_headers.push(name.clone());
    }

    let table = SampleTable::new(unique_headers, columns, row_count);
    if let Ok(times) = table.timestamps() {
        if let Some(idx) = first_decreasing_index(times) {
            warn!(
                "Timestamps are not monotonically non-decreasing (row {} goes back in time)",
                idx + 1
            );
        }
    }
    Ok(table)
}

fn report_header_status(headers: &[String]) {
    let mut joint_count = 0;
    for header in headers {
        if let Some(joint) = header.strip_prefix("cmd_") {
            let state = state_column(joint);
            let found = headers.iter().any(|h| *h == state);
            if found {
                joint_count += 1;
            }
            debug!("  '{}': {}", joint, if found { "cmd/state found" } else { "state missing" });
            if !is_known_joint(joint) {
                warn!("Unrecognised joint code '{}' in header", joint);
            }
        }
    }
    info!("Found {} joints with both command and state columns", joint_count);
}

fn first_decreasing_index(times: &Array1<f64>) -> Option<usize> {
    times
        .windows(2)
        .into_iter()
        .position(|w| w[1] < w[0])
        .map(|i| i + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_CSV: &str = "\
Timestamp,cmd_FFJ1,state_FFJ1,cmd_FFJ2,state_FFJ2
100.0, 0.10, 0.05, 0.20, 0.20
100.5, 0.15, 0.10, 0.25, 0.20
101.0, 0.20, 0.20, 0.30, 0.25
";

    #[test]
    fn test_parse_reads_all_rows() {
        let table = parse_log_reader(SAMPLE_CSV.as_bytes(), 1.0).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.timestamps().unwrap()[2], 101.0);
        let (cmd, state) = table.joint_columns("FFJ2").unwrap();
        assert_eq!(cmd[1], 0.25);
        assert_eq!(state[2], 0.25);
    }

    #[test]
    fn test_parse_scales_timestamps_only() {
        let csv = "Timestamp,cmd_WRJ1,state_WRJ1\n1000000000,1.0,1.0\n2000000000,2.0,2.0\n";
        let table = parse_log_reader(csv.as_bytes(), 1e-9).unwrap();
        let times = table.timestamps().unwrap();
        assert!((times[0] - 1.0).abs() < 1e-12);
        assert!((times[1] - 2.0).abs() < 1e-12);
        assert_eq!(table.column("cmd_WRJ1").unwrap()[1], 2.0);
    }

    #[test]
    fn test_parse_missing_timestamp_column() {
        let csv = "time,cmd_WRJ1,state_WRJ1\n0,1,1\n";
        let err = parse_log_reader(csv.as_bytes(), 1.0).unwrap_err();
        assert!(matches!(
            err,
            MismatchError::MissingColumn { ref column, joint: None } if column == "Timestamp"
        ));
    }

    #[test]
    fn test_parse_records_malformed_cell_lazily() {
        let csv = "Timestamp,cmd_WRJ1,state_WRJ1,note\n0,1,1,ok\n1,oops,1,fine\n";
        let table = parse_log_reader(csv.as_bytes(), 1.0).unwrap();
        match table.column("cmd_WRJ1") {
            Err(MismatchError::DataFormat { column, row, value }) => {
                assert_eq!(column, "cmd_WRJ1");
                assert_eq!(row, 2);
                assert_eq!(value, "oops");
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(table.column("state_WRJ1").is_ok());
    }

    #[test]
    fn test_parse_empty_cell_is_malformed() {
        let csv = "Timestamp,cmd_WRJ1,state_WRJ1\n0,,1\n";
        let table = parse_log_reader(csv.as_bytes(), 1.0).unwrap();
        assert!(matches!(
            table.column("cmd_WRJ1"),
            Err(MismatchError::DataFormat { row: 1, .. })
        ));
    }

    #[test]
    fn test_parse_header_only_gives_empty_table() {
        let csv = "Timestamp,cmd_WRJ1,state_WRJ1\n";
        let table = parse_log_reader(csv.as_bytes(), 1.0).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_parse_ragged_row_is_error() {
        let csv = "Timestamp,cmd_WRJ1,state_WRJ1\n0,1\n";
        assert!(matches!(
            parse_log_reader(csv.as_bytes(), 1.0),
            Err(MismatchError::Csv(_))
        ));
    }

    #[test]
    fn test_parse_duplicate_header_keeps_first_column() {
        let csv = "Timestamp,cmd_WRJ1,state_WRJ1,cmd_WRJ1\n0,0.5,0.5,9.0\n";
        let table = parse_log_reader(csv.as_bytes(), 1.0).unwrap();
        assert_eq!(table.column("cmd_WRJ1").unwrap()[0], 0.5);
        assert_eq!(table.headers().len(), 3);
        assert_eq!(table.available_joints(), vec!["WRJ1".to_string()]);
    }

    #[test]
    fn test_parse_nan_timestamp_fails_when_read() {
        let csv = "Timestamp,cmd_WRJ1,state_WRJ1\nNaN,1,1\n1,1,1\n";
        let table = parse_log_reader(csv.as_bytes(), 1.0).unwrap();
        assert!(matches!(
            table.timestamps(),
            Err(MismatchError::DataFormat { row: 1, ref value, .. }) if value == "NaN"
        ));
    }

    #[test]
    fn test_first_decreasing_index() {
        assert_eq!(first_decreasing_index(&Array1::from(vec![0.0, 1.0, 1.0, 2.0])), None);
        assert_eq!(first_decreasing_index(&Array1::from(vec![0.0, 2.0, 1.0])), Some(2));
    }
}
