//! Row predicate and table filtering.
//!
//! All clauses are AND-ed. Clauses on fields that are not resolved in the
//! table are skipped, except the risk threshold: a row without a risk value
//! never passes.

use polars::prelude::{BooleanChunked, DataFrame, NewChunkedArray};
use retention_model::{
    ColumnMapping, FieldKey, FilterCriteria, KEY_TALENT_GRADES, NumericRange,
};
use tracing::{info, info_span};

use crate::error::Result;
use crate::record::{EmployeeRecord, ResolvedColumns, extract_records};

/// Value used for a missing age or tenure in range checks.
pub const MISSING_RANGE_VALUE: f64 = -1.0;

/// Filtered table plus the matching records.
#[derive(Debug, Clone)]
pub struct FilterOutcome {
    pub frame: DataFrame,
    pub records: Vec<EmployeeRecord>,
    /// Rows in the unfiltered table.
    pub total: usize,
}

impl FilterOutcome {
    pub fn matched(&self) -> usize {
        self.records.len()
    }
}

fn search_matches(needle: &str, resolved: &ResolvedColumns, record: &EmployeeRecord) -> bool {
    FieldKey::SEARCHABLE
        .into_iter()
        .filter(|key| resolved.contains(*key))
        .any(|key| {
            record
                .text(key)
                .is_some_and(|value| value.to_lowercase().contains(needle))
        })
}

fn selections_match(
    criteria: &FilterCriteria,
    resolved: &ResolvedColumns,
    record: &EmployeeRecord,
) -> bool {
    FieldKey::CATEGORICAL
        .into_iter()
        .all(|key| match criteria.selection(key) {
            Some(accepted) if resolved.contains(key) => record
                .text(key)
                .is_some_and(|value| accepted.contains(&value)),
            _ => true,
        })
}

fn in_range(range: Option<NumericRange>, mapped: bool, value: Option<f64>) -> bool {
    match range {
        Some(range) if mapped => range.contains(value.unwrap_or(MISSING_RANGE_VALUE)),
        _ => true,
    }
}

/// True when `record` satisfies every active clause of `criteria`.
pub fn passes(
    criteria: &FilterCriteria,
    resolved: &ResolvedColumns,
    record: &EmployeeRecord,
) -> bool {
    if let Some(needle) = criteria.search_needle()
        && !search_matches(&needle, resolved, record)
    {
        return false;
    }
    if !selections_match(criteria, resolved, record) {
        return false;
    }
    if !record.risk.is_some_and(|risk| risk >= criteria.risk_threshold) {
        return false;
    }
    if criteria.key_talent_only
        && resolved.contains(FieldKey::Talent)
        && !record
            .talent
            .as_deref()
            .is_some_and(|talent| KEY_TALENT_GRADES.contains(&talent))
    {
        return false;
    }
    in_range(criteria.age_range, resolved.contains(FieldKey::Age), record.age)
        && in_range(
            criteria.tenure_range,
            resolved.contains(FieldKey::Tenure),
            record.tenure,
        )
}

/// Applies `criteria` to a normalized table.
///
/// The input frame is left untouched; the outcome holds a filtered copy.
pub fn filter_table(
    df: &DataFrame,
    mapping: &ColumnMapping,
    criteria: &FilterCriteria,
) -> Result<FilterOutcome> {
    let span = info_span!("filter", rows = df.height());
    let _guard = span.enter();

    let resolved = ResolvedColumns::from_frame(mapping, df);
    let records = extract_records(df, &resolved)?;
    let mask: Vec<bool> = records
        .iter()
        .map(|record| passes(criteria, &resolved, record))
        .collect();
    let frame = df.filter(&BooleanChunked::from_slice("mask".into(), &mask))?;
    let records: Vec<EmployeeRecord> = records
        .into_iter()
        .zip(&mask)
        .filter_map(|(record, keep)| keep.then_some(record))
        .collect();

    info!(matched = records.len(), total = df.height(), "filter applied");
    Ok(FilterOutcome {
        frame,
        records,
        total: df.height(),
    })
}
