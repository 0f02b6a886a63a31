//! Reconciling free-form table headers onto the canonical HR fields.
//!
//! Inference is advisory: [`MappingState`] starts from the inferred mapping
//! and accepts any override that names a header of the loaded table.

pub mod engine;
pub mod error;
pub mod rules;
pub mod state;
pub mod suggest;

pub use engine::{find_column, infer_mapping, unmapped_fields};
pub use error::{MappingError, Result};
pub use rules::{FIELD_RULES, FieldRule, candidates};
pub use state::{FieldStatus, MappingState, MappingSummary};
pub use suggest::{HeaderSuggestion, MIN_SUGGESTION_SCORE, suggest_headers};
