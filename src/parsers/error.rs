//! Error types for VCDS log decoding.

use std::path::PathBuf;
use thiserror::Error;

use super::header::HeaderPhase;

/// Errors that can occur while decoding a VCDS log
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Path is missing, not a regular file, or not a `.csv` file
    #[error("Unsupported log source: {}", .path.display())]
    UnsupportedSource { path: PathBuf },

    /// Accepted file could not be read
    #[error("Failed to read log file: {0}")]
    Io(#[from] std::io::Error),

    /// The source ended before the seven header rows were seen
    #[error("Incomplete header: expected 7 header rows, found {rows}")]
    IncompleteHeader { rows: usize },

    /// A row has fewer fields than its phase needs
    #[error("Malformed row {row} ({phase}): expected at least {required} fields, found {found}")]
    MalformedRow {
        row: usize,
        phase: HeaderPhase,
        required: usize,
        found: usize,
    },

    /// A non-binary token is not a valid floating-point number
    #[error("Invalid numeric value {token:?} at row {row}, column {column}")]
    NumericConversion {
        row: usize,
        column: usize,
        token: String,
    },
}

impl DecodeError {
    pub(crate) fn malformed(row: usize, phase: HeaderPhase, required: usize, found: usize) -> Self {
        DecodeError::MalformedRow {
            row,
            phase,
            required,
            found,
        }
    }
}
