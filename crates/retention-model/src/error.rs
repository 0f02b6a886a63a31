use thiserror::Error;

use crate::field::FieldKey;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("unknown field key: {0}")]
    UnknownField(String),
    #[error("field '{0}' does not accept a categorical selection")]
    NotCategorical(FieldKey),
    #[error("invalid range: min {min} is greater than max {max}")]
    InvalidRange { min: f64, max: f64 },
}

pub type Result<T> = std::result::Result<T, ModelError>;
