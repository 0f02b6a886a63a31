//! Shared data model for the HR retention dashboard.

pub mod criteria;
pub mod error;
pub mod field;
pub mod mapping;
pub mod package;

pub use criteria::{
    AGE_BOUNDS, DEFAULT_RISK_THRESHOLD, FilterCriteria, KEY_TALENT_GRADES, NumericRange,
    TENURE_BOUNDS,
};
pub use error::{ModelError, Result};
pub use field::FieldKey;
pub use mapping::{ColumnMapping, UNMAPPED_LABEL};
pub use package::{RetentionAction, RetentionPackage, RoiEstimate, UrgencyTier};
