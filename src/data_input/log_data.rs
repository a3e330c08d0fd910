// src/data_input/log_data.rs

use std::collections::HashMap;

use ndarray::Array1;

use crate::error::{MismatchError, Result};
use crate::joint_names::{cmd_column, state_column, TIMESTAMP_COLUMN};

/// One CSV column after parsing.
///
/// A column holding a non-numeric cell keeps the first offending cell instead of
/// values, so the error only surfaces if a computation actually reads it.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Numeric(Array1<f64>),
    Malformed { row: usize, value: String },
}

/// Timestamped command/state samples loaded from one joint log.
#[derive(Debug, Clone, Default)]
pub struct SampleTable {
    headers: Vec<String>,
    columns: HashMap<String, ColumnData>,
    row_count: usize,
}

impl SampleTable {
    /// Builds a table from already-parsed columns. Every column must have `row_count` entries.
    pub fn new(headers: Vec<String>, columns: HashMap<String, ColumnData>, row_count: usize) -> Self {
        Self {
            headers,
            columns,
            row_count,
        }
    }

    /// Convenience constructor from numeric columns, in header order.
    pub fn from_columns<S: Into<String>>(columns: Vec<(S, Vec<f64>)>) -> Self {
        let mut headers = Vec::with_capacity(columns.len());
        let mut map = HashMap::with_capacity(columns.len());
        let mut row_count = 0;
        for (name, values) in columns {
            let name = name.into();
            row_count = row_count.max(values.len());
            headers.push(name.clone());
            map.insert(name, ColumnData::Numeric(Array1::from(values)));
        }
        Self::new(headers, map, row_count)
    }

    pub fn len(&self) -> usize {
        self.row_count
    }

    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Returns a numeric column, or the parse failure recorded for it.
    pub fn column(&self, name: &str) -> Result<&Array1<f64>> {
        match self.columns.get(name) {
            Some(ColumnData::Numeric(values)) => Ok(values),
            Some(ColumnData::Malformed { row, value }) => Err(MismatchError::DataFormat {
                column: name.to_string(),
                row: *row,
                value: value.clone(),
            }),
            None => Err(MismatchError::MissingColumn {
                column: name.to_string(),
                joint: None,
            }),
        }
    }

    /// The timestamp column. A `NaN` or infinite timestamp is a format error since
    /// every time axis is measured from the first sample.
    pub fn timestamps(&self) -> Result<&Array1<f64>> {
        let times = self.column(TIMESTAMP_COLUMN)?;
        if let Some((idx, t)) = times.iter().enumerate().find(|(_, t)| !t.is_finite()) {
            return Err(MismatchError::DataFormat {
                column: TIMESTAMP_COLUMN.to_string(),
                row: idx + 1,
                value: t.to_string(),
            });
        }
        Ok(times)
    }

    /// Returns the `(cmd, state)` columns of `joint`.
    pub fn joint_columns(&self, joint: &str) -> Result<(&Array1<f64>, &Array1<f64>)> {
        let cmd_name = cmd_column(joint);
        let state_name = state_column(joint);
        if !self.has_column(&cmd_name) {
            return Err(MismatchError::missing_joint_column(cmd_name, joint));
        }
        if !self.has_column(&state_name) {
            return Err(MismatchError::missing_joint_column(state_name, joint));
        }
        Ok((self.column(&cmd_name)?, self.column(&state_name)?))
    }

    /// Joint codes that have both a command and a state column, in header order.
    pub fn available_joints(&self) -> Vec<String> {
        self.headers
            .iter()
            .filter_map(|h| h.strip_prefix("cmd_"))
            .filter(|joint| self.has_column(&state_column(joint)))
            .map(str::to_string)
            .collect()
    }
}
