//! Distinct values offered by the categorical multi-selects.

use std::collections::{BTreeMap, BTreeSet};

use retention_model::FieldKey;

use crate::record::{EmployeeRecord, ResolvedColumns};

/// Sorted distinct non-missing values per resolved categorical field.
pub fn filter_options(
    records: &[EmployeeRecord],
    resolved: &ResolvedColumns,
) -> BTreeMap<FieldKey, Vec<String>> {
    FieldKey::CATEGORICAL
        .into_iter()
        .filter(|key| resolved.contains(*key))
        .map(|key| {
            let values: BTreeSet<String> =
                records.iter().filter_map(|record| record.text(key)).collect();
            (key, values.into_iter().collect())
        })
        .collect()
}
