//! Retention package and ROI value types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Urgency classification derived from a risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyTier {
    Low,
    Medium,
    High,
    Critical,
}

impl UrgencyTier {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    /// Critical and high tiers receive the escalation action set.
    #[must_use]
    pub fn is_escalation(self) -> bool {
        matches!(self, Self::Critical | Self::High)
    }
}

impl fmt::Display for UrgencyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One checklist entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetentionAction {
    pub description: String,
    /// Role accountable for the action.
    pub responsible: String,
    pub deadline: String,
}

impl RetentionAction {
    pub fn new(description: &str, responsible: &str, deadline: &str) -> Self {
        Self {
            description: description.to_string(),
            responsible: responsible.to_string(),
            deadline: deadline.to_string(),
        }
    }
}

/// Recommendation derived from one employee's risk and salary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetentionPackage {
    pub tier: UrgencyTier,
    pub title: String,
    /// Budget in units of 10,000 currency units.
    pub budget: i64,
    pub timeline: String,
    pub immediate: Vec<RetentionAction>,
    pub follow_up: Vec<RetentionAction>,
}

/// Estimated cost of losing an employee.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoiEstimate {
    pub recruiting: f64,
    pub training: f64,
    pub lost_productivity: f64,
    pub total: f64,
}
