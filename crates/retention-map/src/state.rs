//! Mapping state for one loaded table.
//!
//! Holds the table's headers, the mapping inference produced and the mapping
//! as edited by the user. Edits persist until the state is rebuilt for a new
//! table; [`MappingState::reset`] returns to the inferred mapping.

use retention_model::{ColumnMapping, FieldKey};
use serde::Serialize;
use tracing::{debug, info};

use crate::engine::infer_mapping;
use crate::error::{MappingError, Result};
use crate::suggest::{HeaderSuggestion, suggest_headers};

/// How a field obtained its current header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldStatus {
    /// Header chosen by inference and left untouched.
    Inferred,
    /// Header chosen (or cleared) by the user.
    Manual,
    Unmapped,
}

/// Counts over the current mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MappingSummary {
    pub total_fields: usize,
    pub mapped: usize,
    pub manual: usize,
    pub missing_required: Vec<FieldKey>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MappingState {
    headers: Vec<String>,
    inferred: ColumnMapping,
    mapping: ColumnMapping,
}

impl MappingState {
    /// Runs inference over `headers`.
    pub fn from_headers(headers: Vec<String>) -> Self {
        let inferred = infer_mapping(&headers);
        info!(
            headers = headers.len(),
            mapped = inferred.len(),
            "column mapping inferred"
        );
        Self {
            mapping: inferred.clone(),
            inferred,
            headers,
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Current mapping, including user edits.
    pub fn mapping(&self) -> &ColumnMapping {
        &self.mapping
    }

    /// Mapping as produced by inference.
    pub fn inferred(&self) -> &ColumnMapping {
        &self.inferred
    }

    /// Points `key` at `header`, or marks it unmapped with `None`.
    ///
    /// The header must be one of the table's headers.
    pub fn assign(&mut self, key: FieldKey, header: Option<&str>) -> Result<()> {
        if let Some(header) = header
            && !self.headers.iter().any(|h| h == header)
        {
            return Err(MappingError::ColumnNotFound(header.to_string()));
        }
        debug!(field = %key, header = ?header, "mapping assigned");
        self.mapping.set(key, header.map(ToString::to_string));
        Ok(())
    }

    /// Applies a `field=header` override; an empty header unmaps the field.
    pub fn apply_override(&mut self, spec: &str) -> Result<()> {
        let (field, header) = spec
            .split_once('=')
            .ok_or_else(|| MappingError::InvalidOverride(spec.to_string()))?;
        let key: FieldKey = field
            .parse()
            .map_err(|_| MappingError::UnknownField(field.trim().to_string()))?;
        let header = header.trim();
        self.assign(key, (!header.is_empty()).then_some(header))
    }

    /// Discards user edits.
    pub fn reset(&mut self) {
        self.mapping = self.inferred.clone();
    }

    pub fn status(&self, key: FieldKey) -> FieldStatus {
        match (self.mapping.get(key), self.inferred.get(key)) {
            (None, None) => FieldStatus::Unmapped,
            (current, inferred) if current == inferred => FieldStatus::Inferred,
            (None, Some(_)) => FieldStatus::Unmapped,
            _ => FieldStatus::Manual,
        }
    }

    /// Fails with the required keys that lack a real header.
    pub fn validate_required(&self) -> Result<()> {
        let missing = self.mapping.missing_required(&self.headers);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(MappingError::MissingRequired(missing))
        }
    }

    /// Headers ranked for `key`, best first.
    pub fn suggestions(&self, key: FieldKey, limit: usize) -> Vec<HeaderSuggestion> {
        suggest_headers(key, &self.headers, limit)
    }

    pub fn summary(&self) -> MappingSummary {
        MappingSummary {
            total_fields: FieldKey::ALL.len(),
            mapped: self.mapping.len(),
            manual: FieldKey::ALL
                .into_iter()
                .filter(|key| self.mapping.get(*key) != self.inferred.get(*key))
                .count(),
            missing_required: self.mapping.missing_required(&self.headers),
        }
    }
}
