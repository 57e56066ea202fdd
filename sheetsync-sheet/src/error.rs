//! Sheet error types.

use thiserror::Error;

/// Errors raised by workbook and writer operations.
#[derive(Debug, Error)]
pub enum SheetError {
    /// The writer was handed an empty row set.
    #[error("No rows to write")]
    EmptyInput,

    /// A row's column count differs from the first row's.
    #[error("Row {row} has {actual} columns, expected {expected}")]
    JaggedRows {
        /// Zero-based index of the offending row.
        row: usize,
        /// Column count of the first row.
        expected: usize,
        /// Column count of the offending row.
        actual: usize,
    },

    /// A range expression could not be parsed.
    #[error("Invalid range {expr:?}: {reason}")]
    Range {
        /// The rejected expression.
        expr: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// A sheet name that cannot map to a workbook file.
    #[error("Invalid sheet name: {0:?}")]
    InvalidSheetName(String),

    /// CSV encoding or decoding failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Filesystem error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
