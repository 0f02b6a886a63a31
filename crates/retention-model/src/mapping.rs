//! Canonical field to source header association.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::field::FieldKey;

/// Placeholder shown for a field that points at no header.
pub const UNMAPPED_LABEL: &str = "없음";

/// Mapping from [`FieldKey`] to a source table header.
///
/// A key absent from the map is "unmapped". One header per key; the same
/// header may back several keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    columns: BTreeMap<FieldKey, String>,
}

impl ColumnMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Header assigned to `key`, if any.
    pub fn get(&self, key: FieldKey) -> Option<&str> {
        self.columns.get(&key).map(String::as_str)
    }

    pub fn is_mapped(&self, key: FieldKey) -> bool {
        self.columns.contains_key(&key)
    }

    /// Assigns `column` to `key`; `None` marks the key unmapped.
    pub fn set(&mut self, key: FieldKey, column: Option<String>) {
        match column {
            Some(column) => {
                self.columns.insert(key, column);
            }
            None => {
                self.columns.remove(&key);
            }
        }
    }

    /// Builder form of [`Self::set`].
    #[must_use]
    pub fn with(mut self, key: FieldKey, column: impl Into<String>) -> Self {
        self.set(key, Some(column.into()));
        self
    }

    /// Mapped pairs in [`FieldKey`] order.
    pub fn iter(&self) -> impl Iterator<Item = (FieldKey, &str)> {
        self.columns.iter().map(|(key, column)| (*key, column.as_str()))
    }

    /// Header for `key` only when it names one of `headers`.
    pub fn resolve<'a>(&'a self, key: FieldKey, headers: &[String]) -> Option<&'a str> {
        self.get(key)
            .filter(|column| headers.iter().any(|header| header == column))
    }

    /// Required keys that are unmapped or point at a header not in `headers`.
    pub fn missing_required(&self, headers: &[String]) -> Vec<FieldKey> {
        FieldKey::REQUIRED
            .into_iter()
            .filter(|key| self.resolve(*key, headers).is_none())
            .collect()
    }

    /// Display value for a key: the header or [`UNMAPPED_LABEL`].
    pub fn display(&self, key: FieldKey) -> &str {
        self.get(key).unwrap_or(UNMAPPED_LABEL)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
