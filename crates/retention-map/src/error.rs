//! Error types for mapping operations.

use retention_model::FieldKey;
use thiserror::Error;

/// Errors from mapping operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    /// Field identifier that names no [`FieldKey`].
    #[error("unknown field: {0}")]
    UnknownField(String),

    /// Header not present in the loaded table.
    #[error("column not found: {0}")]
    ColumnNotFound(String),

    /// Override text not of the form `field=header`.
    #[error("invalid mapping override '{0}', expected field=header")]
    InvalidOverride(String),

    /// Required fields without a header.
    #[error("required fields not mapped: {}", describe_keys(.0))]
    MissingRequired(Vec<FieldKey>),
}

fn describe_keys(keys: &[FieldKey]) -> String {
    keys.iter()
        .map(|key| format!("{} ({})", key.label(), key.as_str()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type for mapping operations.
pub type Result<T> = std::result::Result<T, MappingError>;
