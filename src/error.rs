// src/error.rs

use thiserror::Error;

/// Errors raised while loading a joint log or computing mismatch series.
///
/// All of these are local to a single input file; nothing is retried.
#[derive(Debug, Error)]
pub enum MismatchError {
    /// A `cmd_<joint>`, `state_<joint>` or timestamp column is absent.
    #[error("Missing column '{column}'{}", .joint.as_ref().map(|j| format!(" required by joint {j}")).unwrap_or_default())]
    MissingColumn {
        column: String,
        joint: Option<String>,
    },

    /// The table has no data rows, so there is no reference timestamp.
    #[error("Input table has no data rows")]
    EmptyTable,

    /// A cell that could not be parsed as a number. `row` is the 1-based data row.
    #[error("Non-numeric value '{value}' in column '{column}' at row {row}")]
    DataFormat {
        column: String,
        row: usize,
        value: String,
    },

    /// A row mask that does not line up with the table.
    #[error("Mask length {actual} does not match table length {expected}")]
    MaskLengthMismatch { expected: usize, actual: usize },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl MismatchError {
    pub fn missing_joint_column(column: impl Into<String>, joint: impl Into<String>) -> Self {
        Self::MissingColumn {
            column: column.into(),
            joint: Some(joint.into()),
        }
    }
}

pub type Result<T> = std::result::Result<T, MismatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_column_message_names_joint() {
        let err = MismatchError::missing_joint_column("state_FFJ1", "FFJ1");
        assert_eq!(
            err.to_string(),
            "Missing column 'state_FFJ1' required by joint FFJ1"
        );
    }

    #[test]
    fn test_missing_column_message_without_joint() {
        let err = MismatchError::MissingColumn {
            column: "Timestamp".to_string(),
            joint: None,
        };
        assert_eq!(err.to_string(), "Missing column 'Timestamp'");
    }

    #[test]
    fn test_data_format_message() {
        let err = MismatchError::DataFormat {
            column: "cmd_WRJ1".to_string(),
            row: 4,
            value: "abc".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Non-numeric value 'abc' in column 'cmd_WRJ1' at row 4"
        );
    }
}
