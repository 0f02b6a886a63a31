//! Error types for table ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a table.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Local file not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Decoding Errors ===
    /// Every encoding/delimiter/format combination failed.
    #[error("could not read {source_name} as CSV or spreadsheet: {last_error}")]
    Unreadable {
        source_name: String,
        /// Diagnostic of the last attempt made.
        last_error: String,
    },

    // === DataFrame Errors ===
    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

/// Why a single decode attempt was rejected.
#[derive(Debug, Error)]
pub(crate) enum AttemptError {
    #[error("'{encoding}' codec can't decode the input")]
    Decode { encoding: &'static str },

    #[error("binary content (NUL byte) is not delimited text")]
    BinaryContent,

    #[error("no columns to parse from file")]
    NoColumns,

    #[error("Expected {expected} fields in line {line}, saw {found}")]
    TooManyFields {
        expected: usize,
        line: u64,
        found: usize,
    },

    #[error("{0}")]
    Csv(#[from] csv::Error),

    #[error("{0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("workbook has no worksheet")]
    NoWorksheet,

    #[error("{0}")]
    Frame(#[from] polars::prelude::PolarsError),
}
