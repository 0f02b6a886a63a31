//! Two-pass header inference.

use retention_model::{ColumnMapping, FieldKey};
use tracing::debug;

use crate::rules::FIELD_RULES;

/// Finds the header matching the first viable candidate.
///
/// Pass one compares whole headers case-insensitively, trying candidates in
/// priority order. Pass two looks for a candidate inside a header, again
/// candidates first and headers in source order. Repeated headers resolve to
/// their first occurrence.
pub fn find_column<'a>(headers: &'a [String], candidates: &[&str]) -> Option<&'a str> {
    let lowered: Vec<(String, &str)> = headers
        .iter()
        .map(|header| (header.to_lowercase(), header.as_str()))
        .collect();

    for candidate in candidates {
        let candidate = candidate.to_lowercase();
        if let Some((_, header)) = lowered.iter().find(|(low, _)| *low == candidate) {
            return Some(*header);
        }
    }

    for candidate in candidates {
        let candidate = candidate.to_lowercase();
        if let Some((_, header)) = lowered.iter().find(|(low, _)| low.contains(&candidate)) {
            return Some(*header);
        }
    }
    None
}

/// Infers a mapping for every field; fields with no match stay unmapped.
pub fn infer_mapping(headers: &[String]) -> ColumnMapping {
    let mut mapping = ColumnMapping::new();
    for rule in FIELD_RULES {
        let found = find_column(headers, rule.candidates);
        debug!(field = %rule.key, header = ?found, "inferred column");
        mapping.set(rule.key, found.map(ToString::to_string));
    }
    mapping
}

/// Fields that inference left unmapped, in presentation order.
pub fn unmapped_fields(mapping: &ColumnMapping) -> Vec<FieldKey> {
    FieldKey::ALL
        .into_iter()
        .filter(|key| !mapping.is_mapped(*key))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn exact_match_beats_substring() {
        let cols = headers(&["퇴직위험도_예전", "퇴직위험도"]);
        assert_eq!(find_column(&cols, &["퇴직위험도"]), Some("퇴직위험도"));
    }

    #[test]
    fn exact_match_is_case_insensitive() {
        let cols = headers(&["Employee", "NAME"]);
        assert_eq!(find_column(&cols, &["성명", "이름", "name"]), Some("NAME"));
    }

    #[test]
    fn earlier_candidate_wins_exact_pass() {
        let cols = headers(&["name", "이름"]);
        assert_eq!(find_column(&cols, &["성명", "이름", "name"]), Some("이름"));
    }

    #[test]
    fn substring_scans_headers_in_order() {
        let cols = headers(&["본부코드", "소속본부명"]);
        assert_eq!(find_column(&cols, &["본부"]), Some("본부코드"));
    }

    #[test]
    fn substring_tries_candidates_in_priority_order() {
        let cols = headers(&["employee_name", "org_unit_name"]);
        assert_eq!(find_column(&cols, &["조직", "org"]), Some("org_unit_name"));
        assert_eq!(find_column(&cols, &["name"]), Some("employee_name"));
    }

    #[test]
    fn no_match_is_none() {
        assert_eq!(find_column(&headers(&["a", "b"]), &["성명"]), None);
        assert_eq!(find_column(&[], &["성명"]), None);
    }

    #[test]
    fn first_of_repeated_lowercase_headers() {
        let cols = headers(&["Risk", "RISK"]);
        assert_eq!(find_column(&cols, &["risk"]), Some("Risk"));
    }

    #[test]
    fn infers_every_rule() {
        let cols = headers(&["성명", "본부", "퇴직위험도", "근속연수", "Salary"]);
        let mapping = infer_mapping(&cols);
        assert_eq!(mapping.get(FieldKey::Name), Some("성명"));
        assert_eq!(mapping.get(FieldKey::Org), Some("본부"));
        assert_eq!(mapping.get(FieldKey::Risk), Some("퇴직위험도"));
        assert_eq!(mapping.get(FieldKey::Tenure), Some("근속연수"));
        assert_eq!(mapping.get(FieldKey::Salary), Some("Salary"));
        assert!(unmapped_fields(&mapping).contains(&FieldKey::Email));
    }
}
