//! Retention package generation and ROI estimation.
//!
//! Both are pure functions of `(risk, salary)`. A missing risk counts as 0
//! and a missing salary counts as 0.

use retention_model::{RetentionAction, RetentionPackage, RoiEstimate, UrgencyTier};

/// Budgets are reported in units of 10,000 (만원).
pub const BUDGET_SCALE: f64 = 10_000.0;

pub const ROI_RECRUITING: f64 = 0.3;
pub const ROI_TRAINING: f64 = 0.2;
pub const ROI_LOST_PRODUCTIVITY: f64 = 0.5;

/// First matching lower bound wins, highest tier first.
const TIER_THRESHOLDS: [(f64, UrgencyTier); 3] = [
    (70.0, UrgencyTier::Critical),
    (50.0, UrgencyTier::High),
    (30.0, UrgencyTier::Medium),
];

#[must_use]
pub fn tier_for_risk(risk: Option<f64>) -> UrgencyTier {
    let risk = risk.unwrap_or(0.0);
    TIER_THRESHOLDS
        .into_iter()
        .find(|(lower, _)| risk >= *lower)
        .map_or(UrgencyTier::Low, |(_, tier)| tier)
}

/// Share of the annual salary earmarked for retention.
#[must_use]
pub fn budget_fraction(tier: UrgencyTier) -> f64 {
    match tier {
        UrgencyTier::Critical => 0.25,
        UrgencyTier::High => 0.15,
        UrgencyTier::Medium => 0.08,
        UrgencyTier::Low => 0.04,
    }
}

#[must_use]
pub fn tier_title(tier: UrgencyTier) -> &'static str {
    match tier {
        UrgencyTier::Critical => "🚨 긴급 리텐션 패키지",
        UrgencyTier::High => "⚠️ 집중 관리 패키지",
        UrgencyTier::Medium => "🎯 예방적 관리 패키지",
        UrgencyTier::Low => "🙂 정기 케어 패키지",
    }
}

#[must_use]
pub fn tier_timeline(tier: UrgencyTier) -> &'static str {
    match tier {
        UrgencyTier::Critical => "48시간 내",
        UrgencyTier::High => "1주일 내",
        UrgencyTier::Medium => "2주 내",
        UrgencyTier::Low => "1개월 내",
    }
}

pub fn immediate_actions(tier: UrgencyTier) -> Vec<RetentionAction> {
    if tier.is_escalation() {
        vec![
            RetentionAction::new("CEO/임원진 긴급 면담", "CEO", "24~48시간"),
            RetentionAction::new("특별 보상 인상 검토", "CHO", "48시간"),
            RetentionAction::new("프로젝트/팀 재배치", "부서장", "1주"),
        ]
    } else {
        vec![
            RetentionAction::new("팀장 정기 1:1 설정", "팀장", "1주"),
            RetentionAction::new("근무환경 만족도 조사", "HR팀", "1주"),
        ]
    }
}

pub fn follow_up_actions(tier: UrgencyTier) -> Vec<RetentionAction> {
    if tier == UrgencyTier::Critical {
        vec![RetentionAction::new("전담 멘토/성장 로드맵", "CHO/HR", "2주")]
    } else {
        vec![RetentionAction::new("외부 교육/세미나", "HR팀", "2주")]
    }
}

/// Budget in [`BUDGET_SCALE`] units, rounded half to even.
#[must_use]
pub fn budget_for(tier: UrgencyTier, salary: Option<f64>) -> i64 {
    let salary = salary.unwrap_or(0.0);
    (salary * budget_fraction(tier) / BUDGET_SCALE).round_ties_even() as i64
}

pub fn generate_package(risk: Option<f64>, salary: Option<f64>) -> RetentionPackage {
    let tier = tier_for_risk(risk);
    RetentionPackage {
        tier,
        title: tier_title(tier).to_string(),
        budget: budget_for(tier, salary),
        timeline: tier_timeline(tier).to_string(),
        immediate: immediate_actions(tier),
        follow_up: follow_up_actions(tier),
    }
}

/// Cost of losing the employee; `total` is the sum of the three components.
#[must_use]
pub fn estimate_roi(salary: Option<f64>) -> RoiEstimate {
    let salary = salary.unwrap_or(0.0);
    let recruiting = salary * ROI_RECRUITING;
    let training = salary * ROI_TRAINING;
    let lost_productivity = salary * ROI_LOST_PRODUCTIVITY;
    RoiEstimate {
        recruiting,
        training,
        lost_productivity,
        total: recruiting + training + lost_productivity,
    }
}

/// ROI total in [`BUDGET_SCALE`] units, truncated toward zero.
#[must_use]
pub fn expected_loss_saved(roi: &RoiEstimate) -> i64 {
    (roi.total / BUDGET_SCALE).trunc() as i64
}
