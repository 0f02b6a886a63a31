//! Filter configuration for the employee table.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::field::FieldKey;

/// Initial risk threshold of the dashboard.
pub const DEFAULT_RISK_THRESHOLD: f64 = 30.0;

/// Talent grades that count as key talent.
pub const KEY_TALENT_GRADES: [&str; 2] = ["Critical", "High"];

/// Slider bounds for the age range.
pub const AGE_BOUNDS: NumericRange = NumericRange { min: 18.0, max: 70.0 };

/// Slider bounds for the tenure range, in years.
pub const TENURE_BOUNDS: NumericRange = NumericRange { min: 0.0, max: 40.0 };

/// Inclusive numeric range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericRange {
    pub min: f64,
    pub max: f64,
}

impl NumericRange {
    /// Creates a range, rejecting `min > max`.
    pub fn new(min: f64, max: f64) -> Result<Self> {
        if min > max {
            return Err(ModelError::InvalidRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// True when `min <= value <= max`.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }
}

/// Every clause the filter engine evaluates, AND-ed per row.
///
/// `Default` is the empty criteria: no search, no selections, threshold 0,
/// key-talent toggle off and no age/tenure range. It keeps every row with a
/// present, non-negative risk value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Case-insensitive substring searched in name/org/team/talent/riskReason.
    pub search: String,
    /// Accepted values per categorical key; empty sets are inactive.
    pub selections: BTreeMap<FieldKey, BTreeSet<String>>,
    /// Inclusive lower bound on risk.
    pub risk_threshold: f64,
    /// Keep only key talent (see [`KEY_TALENT_GRADES`]).
    pub key_talent_only: bool,
    /// Applied only while age is mapped.
    pub age_range: Option<NumericRange>,
    /// Applied only while tenure is mapped.
    pub tenure_range: Option<NumericRange>,
}

impl FilterCriteria {
    /// The dashboard's initial state: threshold 30, key talent only, full
    /// slider ranges for age and tenure.
    #[must_use]
    pub fn dashboard() -> Self {
        Self {
            risk_threshold: DEFAULT_RISK_THRESHOLD,
            key_talent_only: true,
            age_range: Some(AGE_BOUNDS),
            tenure_range: Some(TENURE_BOUNDS),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    #[must_use]
    pub fn with_risk_threshold(mut self, threshold: f64) -> Self {
        self.risk_threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_key_talent_only(mut self, enable: bool) -> Self {
        self.key_talent_only = enable;
        self
    }

    #[must_use]
    pub fn with_age_range(mut self, range: Option<NumericRange>) -> Self {
        self.age_range = range;
        self
    }

    #[must_use]
    pub fn with_tenure_range(mut self, range: Option<NumericRange>) -> Self {
        self.tenure_range = range;
        self
    }

    /// Replaces the accepted values for a categorical key.
    pub fn select<I, S>(&mut self, key: FieldKey, values: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if !key.is_categorical() {
            return Err(ModelError::NotCategorical(key));
        }
        let values: BTreeSet<String> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            self.selections.remove(&key);
        } else {
            self.selections.insert(key, values);
        }
        Ok(())
    }

    /// Active (non-empty) selection for `key`.
    pub fn selection(&self, key: FieldKey) -> Option<&BTreeSet<String>> {
        self.selections.get(&key).filter(|values| !values.is_empty())
    }

    /// Lowercased search needle, `None` when the search box is blank.
    pub fn search_needle(&self) -> Option<String> {
        if self.search.is_empty() {
            None
        } else {
            Some(self.search.to_lowercase())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_is_inclusive() {
        let range = NumericRange::new(18.0, 70.0).unwrap();
        assert!(range.contains(18.0));
        assert!(range.contains(70.0));
        assert!(!range.contains(-1.0));
        assert!(NumericRange::new(5.0, 1.0).is_err());
    }

    #[test]
    fn select_rejects_non_categorical_keys() {
        let mut criteria = FilterCriteria::default();
        assert_eq!(
            criteria.select(FieldKey::Salary, ["1"]),
            Err(ModelError::NotCategorical(FieldKey::Salary))
        );
        criteria.select(FieldKey::Org, ["영업본부"]).unwrap();
        assert_eq!(criteria.selection(FieldKey::Org).map(BTreeSet::len), Some(1));
        criteria.select(FieldKey::Org, Vec::<String>::new()).unwrap();
        assert!(criteria.selection(FieldKey::Org).is_none());
    }

    #[test]
    fn dashboard_defaults() {
        let criteria = FilterCriteria::dashboard();
        assert_eq!(criteria.risk_threshold, DEFAULT_RISK_THRESHOLD);
        assert!(criteria.key_talent_only);
        assert_eq!(criteria.age_range, Some(AGE_BOUNDS));
        assert_eq!(criteria.tenure_range, Some(TENURE_BOUNDS));
        assert!(criteria.search_needle().is_none());
    }
}
