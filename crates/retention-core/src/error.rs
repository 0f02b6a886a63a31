//! Error types for the dashboard session.

use retention_ingest::IngestError;
use retention_map::MappingError;
use retention_report::ReportError;
use retention_transform::TransformError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no table loaded")]
    NoTable,

    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Mapping(#[from] MappingError),

    #[error(transparent)]
    Transform(#[from] TransformError),

    #[error(transparent)]
    Report(#[from] ReportError),

    #[error("employee not found in filtered rows: {0}")]
    UnknownEmployee(String),
}

impl SessionError {
    /// Unreadable input or missing required mapping: nothing can be shown
    /// until the user uploads another file or fixes the mapping.
    pub fn is_blocking(&self) -> bool {
        matches!(
            self,
            Self::NoTable
                | Self::Ingest(_)
                | Self::Mapping(MappingError::MissingRequired(_))
        )
    }
}

pub type Result<T> = std::result::Result<T, SessionError>;
