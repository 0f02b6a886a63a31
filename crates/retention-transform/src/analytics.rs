//! KPIs and distributions over a filtered subset.

use std::collections::BTreeMap;
use std::fmt;

use retention_ingest::polars_utils::format_numeric;
use retention_model::FieldKey;
use serde::Serialize;

use crate::record::{EmployeeRecord, ResolvedColumns};

/// Upper bound of the risk scale; the last bucket includes it.
pub const RISK_MAX: f64 = 100.0;

/// Risk histogram bounds: `[lower, upper)`, the last bucket closed at [`RISK_MAX`].
pub const RISK_BUCKETS: [(&str, f64, f64); 4] = [
    ("0-29", 0.0, 30.0),
    ("30-49", 30.0, 50.0),
    ("50-69", 50.0, 70.0),
    ("70+", 70.0, RISK_MAX),
];

/// An aggregate that may be absent for two different reasons.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "lowercase")]
pub enum Metric {
    Value(f64),
    /// Field is mapped but the subset has no values.
    NoData,
    /// Field is not mapped.
    Unavailable,
}

impl Metric {
    pub fn value(self) -> Option<f64> {
        match self {
            Self::Value(value) => Some(value),
            Self::NoData | Self::Unavailable => None,
        }
    }

    /// Fixed-point rendering; `-` without a value.
    pub fn format_fixed(self, decimals: usize) -> String {
        self.value()
            .map_or_else(|| "-".to_string(), |value| format!("{value:.decimals$}"))
    }

    /// Rounded integer with thousands separators; `-` without a value.
    pub fn format_grouped(self) -> String {
        self.value()
            .map_or_else(|| "-".to_string(), |value| group_thousands(value.round_ties_even()))
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => f.write_str(&format_numeric(*value)),
            Self::NoData => f.write_str("no data"),
            Self::Unavailable => f.write_str("unavailable"),
        }
    }
}

/// Formats an integral value as `1,234,567`.
pub fn group_thousands(value: f64) -> String {
    let digits = format!("{:.0}", value.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if value < 0.0 && digits != "0" {
        grouped.insert(0, '-');
    }
    grouped
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KpiSummary {
    pub headcount: usize,
    pub avg_risk: Metric,
    pub avg_tenure: Metric,
    pub avg_salary: Metric,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub value: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskBucket {
    pub label: &'static str,
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

impl RiskBucket {
    fn contains(&self, risk: f64) -> bool {
        risk >= self.lower
            && (risk < self.upper || (self.upper == RISK_MAX && risk == RISK_MAX))
    }
}

/// Every aggregate the dashboard shows for one subset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analytics {
    pub kpis: KpiSummary,
    /// `None` when grade is unmapped.
    pub grade: Option<Vec<CategoryCount>>,
    /// `None` when level is unmapped.
    pub level: Option<Vec<CategoryCount>>,
    pub risk_buckets: Vec<RiskBucket>,
}

fn mean_of(records: &[EmployeeRecord], resolved: &ResolvedColumns, key: FieldKey) -> Metric {
    if !resolved.contains(key) {
        return Metric::Unavailable;
    }
    let values: Vec<f64> = records.iter().filter_map(|r| r.number(key)).collect();
    if values.is_empty() {
        Metric::NoData
    } else {
        Metric::Value(values.iter().sum::<f64>() / values.len() as f64)
    }
}

pub fn compute_kpis(records: &[EmployeeRecord], resolved: &ResolvedColumns) -> KpiSummary {
    KpiSummary {
        headcount: records.len(),
        avg_risk: mean_of(records, resolved, FieldKey::Risk),
        avg_tenure: mean_of(records, resolved, FieldKey::Tenure),
        avg_salary: mean_of(records, resolved, FieldKey::Salary),
    }
}

/// Count per grade, most frequent first (ties by value).
pub fn grade_distribution(
    records: &[EmployeeRecord],
    resolved: &ResolvedColumns,
) -> Option<Vec<CategoryCount>> {
    if !resolved.contains(FieldKey::Grade) {
        return None;
    }
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for grade in records.iter().filter_map(|r| r.grade.clone()) {
        *counts.entry(grade).or_default() += 1;
    }
    let mut out: Vec<CategoryCount> = counts
        .into_iter()
        .map(|(value, count)| CategoryCount { value, count })
        .collect();
    out.sort_by(|a, b| b.count.cmp(&a.count));
    Some(out)
}

/// Count per level, in ascending numeric order.
pub fn level_distribution(
    records: &[EmployeeRecord],
    resolved: &ResolvedColumns,
) -> Option<Vec<CategoryCount>> {
    if !resolved.contains(FieldKey::Level) {
        return None;
    }
    let mut levels: Vec<f64> = records
        .iter()
        .filter_map(|r| r.level)
        .filter(|level| level.is_finite())
        .collect();
    levels.sort_by(f64::total_cmp);

    let mut out: Vec<CategoryCount> = Vec::new();
    for level in levels {
        let value = format_numeric(level);
        match out.last_mut() {
            Some(last) if last.value == value => last.count += 1,
            _ => out.push(CategoryCount { value, count: 1 }),
        }
    }
    Some(out)
}

/// Four-bucket risk histogram; empty buckets are kept with a zero count.
pub fn risk_buckets(records: &[EmployeeRecord]) -> Vec<RiskBucket> {
    let mut buckets: Vec<RiskBucket> = RISK_BUCKETS
        .into_iter()
        .map(|(label, lower, upper)| RiskBucket {
            label,
            lower,
            upper,
            count: 0,
        })
        .collect();
    for risk in records.iter().filter_map(|r| r.risk) {
        if let Some(bucket) = buckets.iter_mut().find(|bucket| bucket.contains(risk)) {
            bucket.count += 1;
        }
    }
    buckets
}

pub fn analyze(records: &[EmployeeRecord], resolved: &ResolvedColumns) -> Analytics {
    Analytics {
        kpis: compute_kpis(records, resolved),
        grade: grade_distribution(records, resolved),
        level: level_distribution(records, resolved),
        risk_buckets: risk_buckets(records),
    }
}
