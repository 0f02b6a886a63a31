//! Canonical HR attributes.
//!
//! Every source table is reconciled onto this fixed schema before any
//! filtering or analysis happens. The declaration order of [`FieldKey`] is the
//! order fields are presented in mapping tables.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// One of the canonical attributes the dashboard understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKey {
    Name,
    Org,
    Team,
    Grade,
    Level,
    Age,
    Tenure,
    Salary,
    Talent,
    Risk,
    RiskProb,
    RiskReason,
    Phone,
    Email,
}

impl FieldKey {
    /// All keys in presentation order.
    pub const ALL: [FieldKey; 14] = [
        FieldKey::Name,
        FieldKey::Org,
        FieldKey::Team,
        FieldKey::Grade,
        FieldKey::Level,
        FieldKey::Age,
        FieldKey::Tenure,
        FieldKey::Salary,
        FieldKey::Talent,
        FieldKey::Risk,
        FieldKey::RiskProb,
        FieldKey::RiskReason,
        FieldKey::Phone,
        FieldKey::Email,
    ];

    /// Keys that must be mapped before anything downstream runs.
    pub const REQUIRED: [FieldKey; 3] = [FieldKey::Name, FieldKey::Org, FieldKey::Risk];

    /// Keys whose columns are coerced to numbers.
    pub const NUMERIC: [FieldKey; 6] = [
        FieldKey::Level,
        FieldKey::Age,
        FieldKey::Tenure,
        FieldKey::Salary,
        FieldKey::Risk,
        FieldKey::RiskProb,
    ];

    /// Keys that accept a multi-select membership filter.
    pub const CATEGORICAL: [FieldKey; 6] = [
        FieldKey::Org,
        FieldKey::Team,
        FieldKey::Grade,
        FieldKey::Level,
        FieldKey::Talent,
        FieldKey::RiskReason,
    ];

    /// Keys scanned by the free-text search.
    pub const SEARCHABLE: [FieldKey; 5] = [
        FieldKey::Name,
        FieldKey::Org,
        FieldKey::Team,
        FieldKey::Talent,
        FieldKey::RiskReason,
    ];

    /// Stable identifier used in mapping overrides and serialized output.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Org => "org",
            Self::Team => "team",
            Self::Grade => "grade",
            Self::Level => "level",
            Self::Age => "age",
            Self::Tenure => "tenure",
            Self::Salary => "salary",
            Self::Talent => "talent",
            Self::Risk => "risk",
            Self::RiskProb => "riskProb",
            Self::RiskReason => "riskReason",
            Self::Phone => "phone",
            Self::Email => "email",
        }
    }

    /// Display label shown next to mapping selectors and table headers.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "성명",
            Self::Org => "본부",
            Self::Team => "팀",
            Self::Grade => "성과등급",
            Self::Level => "직급레벨",
            Self::Age => "나이",
            Self::Tenure => "근속연수(년)",
            Self::Salary => "연봉(원)",
            Self::Talent => "인재등급",
            Self::Risk => "퇴직위험도",
            Self::RiskProb => "퇴직위험예측확률",
            Self::RiskReason => "위험요인",
            Self::Phone => "휴대폰",
            Self::Email => "이메일",
        }
    }

    #[must_use]
    pub fn is_required(self) -> bool {
        Self::REQUIRED.contains(&self)
    }

    #[must_use]
    pub fn is_numeric(self) -> bool {
        Self::NUMERIC.contains(&self)
    }

    #[must_use]
    pub fn is_categorical(self) -> bool {
        Self::CATEGORICAL.contains(&self)
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldKey {
    type Err = ModelError;

    /// Accepts the canonical identifier in any case, with or without `_`/`-`
    /// separators (`riskProb`, `risk_prob`, `RISK-PROB`).
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let compact: String = raw
            .trim()
            .chars()
            .filter(|ch| *ch != '_' && *ch != '-')
            .flat_map(char::to_lowercase)
            .collect();
        Self::ALL
            .into_iter()
            .find(|key| key.as_str().to_lowercase() == compact)
            .ok_or_else(|| ModelError::UnknownField(raw.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_identifiers_loosely() {
        assert_eq!("riskProb".parse::<FieldKey>().unwrap(), FieldKey::RiskProb);
        assert_eq!("risk_reason".parse::<FieldKey>().unwrap(), FieldKey::RiskReason);
        assert_eq!(" NAME ".parse::<FieldKey>().unwrap(), FieldKey::Name);
        assert!(matches!(
            "salary2".parse::<FieldKey>(),
            Err(ModelError::UnknownField(value)) if value == "salary2"
        ));
    }

    #[test]
    fn key_groups_are_consistent() {
        assert!(FieldKey::REQUIRED.iter().all(|key| key.is_required()));
        assert!(FieldKey::Level.is_numeric() && FieldKey::Level.is_categorical());
        assert!(!FieldKey::Phone.is_categorical());
        assert_eq!(FieldKey::ALL.len(), 14);
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_string(&FieldKey::RiskReason).unwrap();
        assert_eq!(json, "\"riskReason\"");
    }
}
