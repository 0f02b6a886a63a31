//! Priority ordering of the filtered employees.

use std::cmp::Ordering;

use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};
use retention_model::FieldKey;
use serde::Serialize;

use crate::error::Result;
use crate::record::{EmployeeRecord, ResolvedColumns};

/// Rows shown in the priority table.
pub const PRIORITY_LIMIT: usize = 200;

/// Columns of the priority table, shown when resolved.
pub const PRIORITY_FIELDS: [FieldKey; 7] = [
    FieldKey::Name,
    FieldKey::Org,
    FieldKey::Talent,
    FieldKey::Level,
    FieldKey::Salary,
    FieldKey::Risk,
    FieldKey::RiskReason,
];

/// Sort weight of a talent grade; unknown and missing grades rank lowest.
#[must_use]
pub fn talent_rank(talent: Option<&str>) -> u8 {
    match talent {
        Some("Critical") => 4,
        Some("High") => 3,
        Some("Standard") => 2,
        Some("Development") => 1,
        _ => 0,
    }
}

fn desc_missing_last(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Sorts by risk, then talent rank, then salary (when resolved), all
/// descending with missing values last. The sort is stable.
pub fn rank_records(
    mut records: Vec<EmployeeRecord>,
    resolved: &ResolvedColumns,
) -> Vec<EmployeeRecord> {
    let talent_mapped = resolved.contains(FieldKey::Talent);
    let salary_mapped = resolved.contains(FieldKey::Salary);
    let rank = |record: &EmployeeRecord| {
        if talent_mapped {
            talent_rank(record.talent.as_deref())
        } else {
            0
        }
    };
    records.sort_by(|a, b| {
        desc_missing_last(a.risk, b.risk)
            .then_with(|| rank(b).cmp(&rank(a)))
            .then_with(|| {
                if salary_mapped {
                    desc_missing_last(a.salary, b.salary)
                } else {
                    Ordering::Equal
                }
            })
    });
    records
}

/// Distinct names in ranked order.
pub fn employee_names(ranked: &[EmployeeRecord]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for name in ranked.iter().filter_map(|record| record.name.as_ref()) {
        if !names.contains(name) {
            names.push(name.clone());
        }
    }
    names
}

/// First ranked record named `name`.
pub fn find_employee<'a>(
    ranked: &'a [EmployeeRecord],
    name: &str,
) -> Option<&'a EmployeeRecord> {
    ranked
        .iter()
        .find(|record| record.name.as_deref() == Some(name))
}

/// Head of the ranked list with its visible columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriorityList {
    pub columns: Vec<FieldKey>,
    pub rows: Vec<EmployeeRecord>,
}

impl PriorityList {
    pub fn from_ranked(
        ranked: &[EmployeeRecord],
        resolved: &ResolvedColumns,
        limit: usize,
    ) -> Self {
        Self {
            columns: PRIORITY_FIELDS
                .into_iter()
                .filter(|key| resolved.contains(*key))
                .collect(),
            rows: ranked.iter().take(limit).cloned().collect(),
        }
    }

    /// Frame with one column per visible field, named by display label.
    pub fn to_frame(&self) -> Result<DataFrame> {
        let columns: Vec<Column> = self
            .columns
            .iter()
            .map(|key| {
                let name = key.label().into();
                if key.is_numeric() {
                    let values: Vec<Option<f64>> =
                        self.rows.iter().map(|row| row.number(*key)).collect();
                    Series::new(name, values).into_column()
                } else {
                    let values: Vec<Option<String>> =
                        self.rows.iter().map(|row| row.text(*key)).collect();
                    Series::new(name, values).into_column()
                }
            })
            .collect();
        Ok(DataFrame::new(columns)?)
    }
}

#[cfg(test)]
mod tests {
    use retention_model::ColumnMapping;

    use super::*;

    fn resolved(keys: &[FieldKey]) -> ResolvedColumns {
        let mapping = keys
            .iter()
            .fold(ColumnMapping::new(), |mapping, key| mapping.with(*key, key.as_str()));
        let headers: Vec<String> = keys.iter().map(|key| key.as_str().to_string()).collect();
        ResolvedColumns::new(&mapping, &headers)
    }

    fn employee(name: &str, risk: Option<f64>, talent: &str, salary: Option<f64>) -> EmployeeRecord {
        EmployeeRecord {
            name: Some(name.to_string()),
            risk,
            talent: Some(talent.to_string()),
            salary,
            ..EmployeeRecord::default()
        }
    }

    fn names(records: &[EmployeeRecord]) -> Vec<&str> {
        records.iter().filter_map(|r| r.name.as_deref()).collect()
    }

    #[test]
    fn ranks_by_risk_then_talent_then_salary() {
        let cols = resolved(&[FieldKey::Name, FieldKey::Risk, FieldKey::Talent, FieldKey::Salary]);
        let ranked = rank_records(
            vec![
                employee("a", Some(50.0), "High", Some(1.0)),
                employee("b", None, "Critical", Some(9.0)),
                employee("c", Some(80.0), "Standard", Some(1.0)),
                employee("d", Some(50.0), "Critical", Some(1.0)),
                employee("e", Some(50.0), "Critical", Some(5.0)),
                employee("f", Some(50.0), "Critical", None),
            ],
            &cols,
        );
        assert_eq!(names(&ranked), vec!["c", "e", "d", "f", "a", "b"]);
    }

    #[test]
    fn unmapped_salary_keeps_input_order() {
        let cols = resolved(&[FieldKey::Name, FieldKey::Risk, FieldKey::Talent]);
        let ranked = rank_records(
            vec![
                employee("a", Some(50.0), "High", Some(1.0)),
                employee("b", Some(50.0), "High", Some(9.0)),
            ],
            &cols,
        );
        assert_eq!(names(&ranked), vec!["a", "b"]);
    }

    #[test]
    fn names_are_distinct_in_rank_order() {
        let ranked = vec![
            employee("김민수", Some(90.0), "High", None),
            employee("이영희", Some(80.0), "High", None),
            employee("김민수", Some(70.0), "High", None),
        ];
        assert_eq!(employee_names(&ranked), vec!["김민수", "이영희"]);
        assert_eq!(find_employee(&ranked, "김민수").and_then(|r| r.risk), Some(90.0));
        assert!(find_employee(&ranked, "박철수").is_none());
    }

    #[test]
    fn frame_uses_display_labels() {
        let cols = resolved(&[FieldKey::Name, FieldKey::Org, FieldKey::Risk, FieldKey::Phone]);
        let ranked = vec![employee("김민수", Some(90.0), "High", None)];
        let list = PriorityList::from_ranked(&ranked, &cols, PRIORITY_LIMIT);
        assert_eq!(list.columns, vec![FieldKey::Name, FieldKey::Org, FieldKey::Risk]);
        let frame = list.to_frame().unwrap();
        let names: Vec<String> = frame
            .get_column_names()
            .into_iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(names, vec!["성명", "본부", "퇴직위험도"]);
        assert_eq!(frame.height(), 1);
    }
}
