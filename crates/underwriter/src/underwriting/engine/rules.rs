use super::super::domain::{Application, Decision, DecisionKind, RiskLevel};
use super::super::policy::{Policy, PolicyTier};
use super::format::{format_currency, format_percent};
use super::{classify_risk, compute_dti};

/// DTI cap for the high-risk override when the tier carries no usable limit.
const OVERRIDE_FALLBACK_DTI_LIMIT: f64 = 25.0;

/// Accumulates the three reasoning lines alongside the applied-rule trail.
struct DecisionDraft<'a> {
    application: &'a Application,
    risk: RiskLevel,
    applied_rules: Vec<String>,
}

impl<'a> DecisionDraft<'a> {
    fn new(application: &'a Application, risk: RiskLevel) -> Self {
        Self {
            application,
            risk,
            applied_rules: Vec::new(),
        }
    }

    fn apply(&mut self, rule: String) {
        self.applied_rules.push(rule);
    }

    fn finish(self, decision: DecisionKind, dti_line: &str, employment_line: &str) -> Decision {
        let reasoning = format!(
            "Credit score {} falls in {}-risk category ({})\n\
             Debt-to-income ratio: {dti_line}\n\
             Employment: {employment_line}",
            self.application.credit_score,
            self.risk,
            self.risk.score_range()
        );

        Decision {
            decision,
            reasoning,
            risk_level: self.risk,
            applied_rules: self.applied_rules,
        }
    }
}

pub(crate) fn deny_on_credit(application: &Application, policy: &Policy) -> Option<Decision> {
    if application.credit_score >= policy.auto_deny_credit {
        return None;
    }

    let mut draft = DecisionDraft::new(application, RiskLevel::High);
    draft.apply(format!(
        "Automatic denial: credit score {} < {}.",
        application.credit_score, policy.auto_deny_credit
    ));

    Some(draft.finish(
        DecisionKind::Denied,
        "N/A (auto-deny on credit)",
        &format!("{} months", application.employment_months),
    ))
}

pub(crate) fn deny_on_income(application: &Application, policy: &Policy) -> Option<Decision> {
    let income_min = policy.income_min as f64;
    if application.annual_income >= income_min {
        return None;
    }

    let mut draft = DecisionDraft::new(application, classify_risk(application.credit_score));
    draft.apply(format!(
        "Automatic denial: income {} < minimum {}.",
        format_currency(application.annual_income),
        format_currency(income_min)
    ));

    Some(draft.finish(
        DecisionKind::Denied,
        "N/A (auto-deny on income)",
        &format!("{} months", application.employment_months),
    ))
}

/// Tenure requirement: self-employment overrides the tier's own minimum.
pub(crate) fn required_employment_months(application: &Application, policy: &Policy) -> u32 {
    if application.is_self_employed {
        policy.self_employed_months
    } else {
        policy
            .tier(classify_risk(application.credit_score))
            .employment_months
    }
}

pub(crate) fn deny_on_tenure(application: &Application, policy: &Policy) -> Option<Decision> {
    let required = required_employment_months(application, policy);
    let months = application.employment_months;
    if months >= required {
        return None;
    }

    let mut draft = DecisionDraft::new(application, classify_risk(application.credit_score));
    draft.apply(format!("Employment {months} months < required {required}."));

    Some(draft.finish(
        DecisionKind::Denied,
        "N/A (denied due to employment tenure)",
        &format!("{months} months (below required {required} months)"),
    ))
}

pub(crate) fn allowed_dti(application: &Application, policy: &Policy, tier: &PolicyTier) -> f64 {
    let leniency = if application.is_first_time_buyer {
        policy.first_time_buyer_leniency
    } else {
        0.0
    };
    tier.effective_dti_limit() + leniency
}

fn high_risk_override_met(application: &Application, tier: &PolicyTier, dti: f64) -> bool {
    let Some(threshold) = tier.income_override.filter(|value| *value > 0) else {
        return false;
    };

    let cap = tier
        .dti_limit
        .filter(|limit| *limit != 0.0)
        .unwrap_or(OVERRIDE_FALLBACK_DTI_LIMIT);

    application.annual_income > threshold as f64 && dti <= cap
}

pub(crate) fn assess_dti(application: &Application, policy: &Policy) -> Decision {
    let risk = classify_risk(application.credit_score);
    let tier = policy.tier(risk);
    let required = required_employment_months(application, policy);
    let dti = compute_dti(application.annual_income, application.monthly_debt);
    let allowed = allowed_dti(application, policy, tier);

    let mut draft = DecisionDraft::new(application, risk);
    draft.apply(format!(
        "Credit score {} → {risk}-risk; DTI limit {}%.",
        application.credit_score,
        format_percent(allowed)
    ));
    draft.apply(format!("Applicant DTI {}%.", format_percent(dti)));

    let decision = match risk {
        RiskLevel::Low | RiskLevel::Medium if dti <= allowed => DecisionKind::Approved,
        RiskLevel::High if high_risk_override_met(application, tier, dti) => {
            draft.apply("High-risk override satisfied.".to_string());
            DecisionKind::Approved
        }
        _ => DecisionKind::Denied,
    };

    let limit_phrase = if dti <= allowed {
        format!("(within {}% limit for {risk}-risk)", format_percent(allowed))
    } else {
        format!("(exceeds {}% limit for {risk}-risk)", format_percent(allowed))
    };

    let months = application.employment_months;
    let employment_phrase = if months >= required {
        format!("(meets {required}-month minimum)")
    } else {
        format!("(below required {required} months)")
    };

    draft.finish(
        decision,
        &format!("{}% {limit_phrase}", format_percent(dti)),
        &format!("{months} months {employment_phrase}"),
    )
}
