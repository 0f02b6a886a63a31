//! Typed employee rows projected from a normalized table.

use std::collections::BTreeMap;

use polars::prelude::{AnyValue, Column, DataFrame};
use retention_ingest::polars_utils::{
    any_to_f64, any_to_string_non_empty, column_headers, format_numeric,
};
use retention_model::{ColumnMapping, FieldKey};
use serde::Serialize;

use crate::error::Result;

/// Mapped fields whose header exists in the table.
///
/// Clauses and metrics for fields outside this set are skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedColumns {
    columns: BTreeMap<FieldKey, String>,
}

impl ResolvedColumns {
    pub fn new(mapping: &ColumnMapping, headers: &[String]) -> Self {
        let columns = FieldKey::ALL
            .into_iter()
            .filter_map(|key| {
                mapping
                    .resolve(key, headers)
                    .map(|header| (key, header.to_string()))
            })
            .collect();
        Self { columns }
    }

    pub fn from_frame(mapping: &ColumnMapping, df: &DataFrame) -> Self {
        Self::new(mapping, &column_headers(df))
    }

    pub fn contains(&self, key: FieldKey) -> bool {
        self.columns.contains_key(&key)
    }

    pub fn header(&self, key: FieldKey) -> Option<&str> {
        self.columns.get(&key).map(String::as_str)
    }

    pub fn keys(&self) -> impl Iterator<Item = FieldKey> + '_ {
        self.columns.keys().copied()
    }

    /// Resolved `(key, header)` pairs in [`FieldKey`] order.
    pub fn iter(&self) -> impl Iterator<Item = (FieldKey, &str)> {
        self.columns
            .iter()
            .map(|(key, header)| (*key, header.as_str()))
    }
}

/// One employee with every canonical field, `None` when unmapped or missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EmployeeRecord {
    /// Row index in the table the record was read from.
    pub row: usize,
    pub name: Option<String>,
    pub org: Option<String>,
    pub team: Option<String>,
    pub grade: Option<String>,
    pub level: Option<f64>,
    pub age: Option<f64>,
    pub tenure: Option<f64>,
    pub salary: Option<f64>,
    pub talent: Option<String>,
    pub risk: Option<f64>,
    pub risk_prob: Option<f64>,
    pub risk_reason: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl EmployeeRecord {
    /// Numeric value of a numeric field.
    pub fn number(&self, key: FieldKey) -> Option<f64> {
        match key {
            FieldKey::Level => self.level,
            FieldKey::Age => self.age,
            FieldKey::Tenure => self.tenure,
            FieldKey::Salary => self.salary,
            FieldKey::Risk => self.risk,
            FieldKey::RiskProb => self.risk_prob,
            _ => None,
        }
    }

    /// String form of any field; numbers print without trailing zeros.
    pub fn text(&self, key: FieldKey) -> Option<String> {
        if key.is_numeric() {
            return self.number(key).map(format_numeric);
        }
        match key {
            FieldKey::Name => self.name.clone(),
            FieldKey::Org => self.org.clone(),
            FieldKey::Team => self.team.clone(),
            FieldKey::Grade => self.grade.clone(),
            FieldKey::Talent => self.talent.clone(),
            FieldKey::RiskReason => self.risk_reason.clone(),
            FieldKey::Phone => self.phone.clone(),
            FieldKey::Email => self.email.clone(),
            _ => None,
        }
    }

    fn set_number(&mut self, key: FieldKey, value: Option<f64>) {
        match key {
            FieldKey::Level => self.level = value,
            FieldKey::Age => self.age = value,
            FieldKey::Tenure => self.tenure = value,
            FieldKey::Salary => self.salary = value,
            FieldKey::Risk => self.risk = value,
            FieldKey::RiskProb => self.risk_prob = value,
            _ => {}
        }
    }

    fn set_text(&mut self, key: FieldKey, value: Option<String>) {
        match key {
            FieldKey::Name => self.name = value,
            FieldKey::Org => self.org = value,
            FieldKey::Team => self.team = value,
            FieldKey::Grade => self.grade = value,
            FieldKey::Talent => self.talent = value,
            FieldKey::RiskReason => self.risk_reason = value,
            FieldKey::Phone => self.phone = value,
            FieldKey::Email => self.email = value,
            _ => {}
        }
    }
}

fn cell(column: &Column, idx: usize) -> AnyValue<'_> {
    column.get(idx).unwrap_or(AnyValue::Null)
}

/// Projects every row of `df` onto [`EmployeeRecord`].
pub fn extract_records(
    df: &DataFrame,
    resolved: &ResolvedColumns,
) -> Result<Vec<EmployeeRecord>> {
    let mut records: Vec<EmployeeRecord> = (0..df.height())
        .map(|row| EmployeeRecord {
            row,
            ..EmployeeRecord::default()
        })
        .collect();

    for (key, header) in resolved.iter() {
        let column = df.column(header)?;
        for (idx, record) in records.iter_mut().enumerate() {
            if key.is_numeric() {
                record.set_number(key, any_to_f64(cell(column, idx)));
            } else {
                record.set_text(key, any_to_string_non_empty(cell(column, idx)));
            }
        }
    }
    Ok(records)
}
