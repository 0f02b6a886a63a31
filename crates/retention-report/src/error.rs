//! Error types for report generation.

use std::path::PathBuf;

use thiserror::Error;

use crate::checklist::ChecklistSection;

#[derive(Debug, Error)]
pub enum ReportError {
    /// Checklist index past the end of the action list.
    #[error("{section} action {index} does not exist ({len} actions)")]
    ChecklistIndex {
        section: ChecklistSection,
        index: usize,
        len: usize,
    },

    #[error("failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for ReportError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;
