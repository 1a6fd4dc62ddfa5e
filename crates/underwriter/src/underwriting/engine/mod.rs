mod format;
mod rules;

pub use format::{format_currency, format_percent};

use super::domain::{Application, Decision, RiskLevel};
use super::policy::Policy;

/// Classify credit risk from the score alone, independent of any policy.
pub fn classify_risk(credit_score: i32) -> RiskLevel {
    if credit_score >= 720 {
        RiskLevel::Low
    } else if credit_score >= 650 {
        RiskLevel::Medium
    } else {
        RiskLevel::High
    }
}

/// Annualised debt over annual income as a percentage.
///
/// A non-positive income yields positive infinity. Any sane policy has already
/// denied such an applicant on the income floor before this is reached.
pub fn compute_dti(annual_income: f64, monthly_debt: f64) -> f64 {
    if annual_income > 0.0 {
        (monthly_debt * 12.0 / annual_income) * 100.0
    } else {
        f64::INFINITY
    }
}

/// Evaluate an application against a policy.
///
/// Gates run in a fixed order and the first terminal gate wins: credit floor,
/// income floor, employment tenure, then the DTI assessment.
pub fn evaluate(application: &Application, policy: &Policy) -> Decision {
    rules::deny_on_credit(application, policy)
        .or_else(|| rules::deny_on_income(application, policy))
        .or_else(|| rules::deny_on_tenure(application, policy))
        .unwrap_or_else(|| rules::assess_dti(application, policy))
}
