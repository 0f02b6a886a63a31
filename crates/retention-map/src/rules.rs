//! Candidate header names per canonical field.
//!
//! Candidates are listed in priority order. Korean names come first since the
//! dashboard's source exports use them; English synonyms follow.

use retention_model::FieldKey;

/// Priority-ordered candidate header names for one field.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub key: FieldKey,
    pub candidates: &'static [&'static str],
}

/// One rule per [`FieldKey`], in [`FieldKey::ALL`] order.
pub const FIELD_RULES: [FieldRule; 14] = [
    FieldRule {
        key: FieldKey::Name,
        candidates: &["성명", "이름", "name"],
    },
    FieldRule {
        key: FieldKey::Org,
        candidates: &["본부", "조직", "org"],
    },
    FieldRule {
        key: FieldKey::Team,
        candidates: &["팀", "부서", "team"],
    },
    FieldRule {
        key: FieldKey::Grade,
        candidates: &["성과등급"],
    },
    FieldRule {
        key: FieldKey::Level,
        candidates: &["직급레벨", "레벨", "직급"],
    },
    FieldRule {
        key: FieldKey::Age,
        candidates: &["나이"],
    },
    FieldRule {
        key: FieldKey::Tenure,
        candidates: &["근속연수(년)", "근속연수"],
    },
    FieldRule {
        key: FieldKey::Salary,
        candidates: &["연봉(원)", "연봉", "salary"],
    },
    FieldRule {
        key: FieldKey::Talent,
        candidates: &["인재등급"],
    },
    FieldRule {
        key: FieldKey::Risk,
        candidates: &["퇴직위험도", "위험도", "risk"],
    },
    FieldRule {
        key: FieldKey::RiskProb,
        candidates: &["퇴직위험예측확률", "예측확률"],
    },
    FieldRule {
        key: FieldKey::RiskReason,
        candidates: &["위험요인"],
    },
    FieldRule {
        key: FieldKey::Phone,
        candidates: &["휴대폰", "전화", "phone"],
    },
    FieldRule {
        key: FieldKey::Email,
        candidates: &["이메일", "email"],
    },
];

/// Candidate list for `key`.
#[must_use]
pub fn candidates(key: FieldKey) -> &'static [&'static str] {
    FIELD_RULES
        .iter()
        .find(|rule| rule.key == key)
        .map_or(&[], |rule| rule.candidates)
}
