use retention_map::{FIELD_RULES, FieldStatus, MappingError, MappingState, infer_mapping};
use retention_model::FieldKey;

fn headers(values: &[&str]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}

#[test]
fn korean_export_maps_required_fields() {
    let state = MappingState::from_headers(headers(&["성명", "본부", "퇴직위험도"]));
    let mapping = state.mapping();
    assert_eq!(mapping.get(FieldKey::Name), Some("성명"));
    assert_eq!(mapping.get(FieldKey::Org), Some("본부"));
    assert_eq!(mapping.get(FieldKey::Risk), Some("퇴직위험도"));
    assert!(state.validate_required().is_ok());
    assert_eq!(state.status(FieldKey::Name), FieldStatus::Inferred);
    assert_eq!(state.status(FieldKey::Salary), FieldStatus::Unmapped);
}

#[test]
fn top_candidate_always_maps_exactly() {
    for rule in FIELD_RULES {
        let top = rule.candidates[0];
        // A decoy containing the candidate sits before the exact header.
        let cols = headers(&[&format!("{top}_old"), top]);
        let mapping = infer_mapping(&cols);
        assert_eq!(mapping.get(rule.key), Some(top), "{}", rule.key);
    }
}

#[test]
fn english_export_with_mixed_case() {
    let cols = headers(&["Name", "Org", "Team", "Salary", "Risk", "Email", "Phone"]);
    let mapping = infer_mapping(&cols);
    for (key, header) in [
        (FieldKey::Name, "Name"),
        (FieldKey::Org, "Org"),
        (FieldKey::Team, "Team"),
        (FieldKey::Salary, "Salary"),
        (FieldKey::Risk, "Risk"),
        (FieldKey::Email, "Email"),
        (FieldKey::Phone, "Phone"),
    ] {
        assert_eq!(mapping.get(key), Some(header), "{key}");
    }
    assert!(!mapping.is_mapped(FieldKey::Talent));
}

#[test]
fn missing_required_blocks_with_names() {
    let state = MappingState::from_headers(headers(&["성명", "부서명"]));
    let err = state.validate_required().unwrap_err();
    assert_eq!(
        err,
        MappingError::MissingRequired(vec![FieldKey::Org, FieldKey::Risk])
    );
    let message = err.to_string();
    assert!(message.contains("본부") && message.contains("퇴직위험도"));
}

#[test]
fn unmapped_field_gets_suggestions() {
    let state = MappingState::from_headers(headers(&["성명", "본부", "퇴직위험도", "mail_addr"]));
    assert!(!state.mapping().is_mapped(FieldKey::Email));
    let suggestions = state.suggestions(FieldKey::Email, 3);
    assert_eq!(
        suggestions.first().map(|s| s.header.as_str()),
        Some("mail_addr")
    );
}

#[test]
fn summary_serializes() {
    let state = MappingState::from_headers(headers(&["성명", "본부"]));
    let json = serde_json::to_value(state.summary()).unwrap();
    assert_eq!(json["total_fields"], 14);
    assert_eq!(json["mapped"], 2);
    assert_eq!(json["missing_required"], serde_json::json!(["risk"]));
}
