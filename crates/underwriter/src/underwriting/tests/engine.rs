use super::common::*;
use crate::underwriting::domain::{DecisionKind, RiskLevel};
use crate::underwriting::engine::{classify_risk, compute_dti, evaluate};
use crate::underwriting::policy::Policy;

#[test]
fn classification_depends_only_on_score() {
    let cases = [
        (850, RiskLevel::Low),
        (720, RiskLevel::Low),
        (719, RiskLevel::Medium),
        (700, RiskLevel::Medium),
        (650, RiskLevel::Medium),
        (649, RiskLevel::High),
        (600, RiskLevel::High),
        (300, RiskLevel::High),
    ];

    for (score, expected) in cases {
        assert_eq!(classify_risk(score), expected, "score {score}");
    }
}

#[test]
fn dti_is_infinite_without_income() {
    assert_eq!(compute_dti(80_000.0, 1_000.0), 15.0);
    assert!(compute_dti(0.0, 500.0).is_infinite());
    assert!(compute_dti(-10.0, 0.0).is_infinite());
}

#[test]
fn approves_low_risk_applicant_within_limit() {
    let decision = evaluate(&application(), &Policy::default());

    assert_eq!(decision.decision, DecisionKind::Approved);
    assert_eq!(decision.risk_level, RiskLevel::Low);
    assert_eq!(
        decision.reasoning,
        "Credit score 750 falls in low-risk category (≥ 720)\n\
         Debt-to-income ratio: 15.0% (within 40.0% limit for low-risk)\n\
         Employment: 24 months (meets 12-month minimum)"
    );
    assert_eq!(
        decision.applied_rules,
        vec![
            "Credit score 750 → low-risk; DTI limit 40.0%.".to_string(),
            "Applicant DTI 15.0%.".to_string(),
        ]
    );
}

#[test]
fn credit_floor_denies_as_high_risk_regardless_of_other_factors() {
    let application = application_with(|app| {
        app.credit_score = 550;
        app.annual_income = 1_000_000.0;
        app.monthly_debt = 0.0;
        app.employment_months = 240;
    });

    let decision = evaluate(&application, &Policy::default());

    assert_eq!(decision.decision, DecisionKind::Denied);
    assert_eq!(decision.risk_level, RiskLevel::High);
    assert_eq!(
        decision.reasoning,
        "Credit score 550 falls in high-risk category (< 650)\n\
         Debt-to-income ratio: N/A (auto-deny on credit)\n\
         Employment: 240 months"
    );
    assert_eq!(
        decision.applied_rules,
        vec!["Automatic denial: credit score 550 < 600.".to_string()]
    );
}

#[test]
fn credit_floor_hardcodes_high_risk_even_for_strong_scores() {
    let mut policy = Policy::default();
    policy.auto_deny_credit = 760;

    let decision = evaluate(&application(), &policy);

    assert_eq!(decision.decision, DecisionKind::Denied);
    assert_eq!(decision.risk_level, RiskLevel::High);
    assert!(decision
        .reasoning
        .starts_with("Credit score 750 falls in high-risk category (< 650)"));
}

#[test]
fn income_floor_denies_with_classified_risk() {
    let application = application_with(|app| {
        app.credit_score = 700;
        app.annual_income = 30_000.0;
    });

    let decision = evaluate(&application, &Policy::default());

    assert_eq!(decision.decision, DecisionKind::Denied);
    assert_eq!(decision.risk_level, RiskLevel::Medium);
    assert_eq!(
        decision.applied_rules,
        vec!["Automatic denial: income $30,000 < minimum $35,000.".to_string()]
    );
    let lines: Vec<_> = decision.reasoning_lines().collect();
    assert_eq!(
        lines,
        vec![
            "Credit score 700 falls in medium-risk category (650-719)",
            "Debt-to-income ratio: N/A (auto-deny on income)",
            "Employment: 24 months",
        ]
    );
}

#[test]
fn short_tenure_denies_before_dti() {
    let application = application_with(|app| {
        app.credit_score = 690;
        app.employment_months = 17;
        app.monthly_debt = 50_000.0;
    });

    let decision = evaluate(&application, &Policy::default());

    assert_eq!(decision.decision, DecisionKind::Denied);
    assert_eq!(decision.risk_level, RiskLevel::Medium);
    assert_eq!(
        decision.applied_rules,
        vec!["Employment 17 months < required 18.".to_string()]
    );
    assert_eq!(
        decision.reasoning,
        "Credit score 690 falls in medium-risk category (650-719)\n\
         Debt-to-income ratio: N/A (denied due to employment tenure)\n\
         Employment: 17 months (below required 18 months)"
    );
}

#[test]
fn self_employed_applicants_use_policy_tenure() {
    let application = application_with(|app| {
        app.is_self_employed = true;
        app.employment_months = 20;
    });

    let decision = evaluate(&application, &Policy::default());
    assert_eq!(decision.decision, DecisionKind::Denied);
    assert_eq!(
        decision.applied_rules,
        vec!["Employment 20 months < required 24.".to_string()]
    );

    let mut lenient = Policy::default();
    lenient.self_employed_months = 6;
    let application = application_with(|app| {
        app.is_self_employed = true;
        app.credit_score = 630;
        app.employment_months = 8;
        app.annual_income = 160_000.0;
        app.monthly_debt = 3_000.0;
    });

    let decision = evaluate(&application, &lenient);
    assert_eq!(decision.decision, DecisionKind::Approved);
    assert!(decision
        .reasoning
        .ends_with("Employment: 8 months (meets 6-month minimum)"));
}

#[test]
fn dti_equal_to_limit_is_approved() {
    let application = application_with(|app| {
        app.annual_income = 120_000.0;
        app.monthly_debt = 4_000.0;
    });

    let decision = evaluate(&application, &Policy::default());

    assert_eq!(decision.decision, DecisionKind::Approved);
    assert!(decision
        .reasoning
        .contains("Debt-to-income ratio: 40.0% (within 40.0% limit for low-risk)"));
}

#[test]
fn dti_above_limit_is_denied() {
    let application = application_with(|app| {
        app.credit_score = 680;
        app.annual_income = 80_000.0;
        app.monthly_debt = 2_100.0;
    });

    let decision = evaluate(&application, &Policy::default());

    assert_eq!(decision.decision, DecisionKind::Denied);
    assert_eq!(decision.risk_level, RiskLevel::Medium);
    assert!(decision
        .reasoning
        .contains("Debt-to-income ratio: 31.5% (exceeds 30.0% limit for medium-risk)"));
    assert_eq!(decision.applied_rules.len(), 2);
}

#[test]
fn first_time_buyer_leniency_adds_to_limit() {
    let application = application_with(|app| {
        app.annual_income = 100_000.0;
        app.monthly_debt = 3_750.0;
    });

    let regular = evaluate(&application, &Policy::default());
    assert_eq!(regular.decision, DecisionKind::Denied);
    assert_eq!(
        regular.applied_rules[0],
        "Credit score 750 → low-risk; DTI limit 40.0%."
    );

    let first_time = application_with(|app| {
        app.annual_income = 100_000.0;
        app.monthly_debt = 3_750.0;
        app.is_first_time_buyer = true;
    });
    let lenient = evaluate(&first_time, &Policy::default());
    assert_eq!(lenient.decision, DecisionKind::Approved);
    assert_eq!(
        lenient.applied_rules[0],
        "Credit score 750 → low-risk; DTI limit 45.0%."
    );
    assert!(lenient
        .reasoning
        .contains("45.0% (within 45.0% limit for low-risk)"));
}

#[test]
fn high_risk_override_approves_with_extra_rule() {
    let application = application_with(|app| {
        app.credit_score = 620;
        app.annual_income = 160_000.0;
        app.monthly_debt = 3_000.0;
    });

    let decision = evaluate(&application, &Policy::default());

    assert_eq!(decision.decision, DecisionKind::Approved);
    assert_eq!(decision.risk_level, RiskLevel::High);
    assert_eq!(
        decision.applied_rules,
        vec![
            "Credit score 620 → high-risk; DTI limit 25.0%.".to_string(),
            "Applicant DTI 22.5%.".to_string(),
            "High-risk override satisfied.".to_string(),
        ]
    );
}

#[test]
fn high_risk_without_override_income_is_denied() {
    let application = application_with(|app| {
        app.credit_score = 620;
        app.annual_income = 100_000.0;
        app.monthly_debt = 1_000.0;
    });

    let decision = evaluate(&application, &Policy::default());

    assert_eq!(decision.decision, DecisionKind::Denied);
    assert_eq!(decision.applied_rules.len(), 2);
    assert!(decision
        .reasoning
        .contains("12.0% (within 25.0% limit for high-risk)"));
}

#[test]
fn high_risk_override_requires_income_strictly_above_threshold() {
    let application = application_with(|app| {
        app.credit_score = 620;
        app.annual_income = 150_000.0;
        app.monthly_debt = 1_000.0;
    });

    let decision = evaluate(&application, &Policy::default());
    assert_eq!(decision.decision, DecisionKind::Denied);
}

#[test]
fn high_risk_override_respects_dti_cap() {
    let application = application_with(|app| {
        app.credit_score = 620;
        app.annual_income = 160_000.0;
        app.monthly_debt = 3_600.0;
    });

    let decision = evaluate(&application, &Policy::default());
    assert_eq!(decision.decision, DecisionKind::Denied);
    assert!(decision
        .reasoning
        .contains("27.0% (exceeds 25.0% limit for high-risk)"));
}

#[test]
fn high_risk_override_defaults_cap_when_tier_has_no_limit() {
    let mut policy = Policy::default();
    policy.tiers.high.dti_limit = None;
    let application = application_with(|app| {
        app.credit_score = 620;
        app.annual_income = 160_000.0;
        app.monthly_debt = 3_000.0;
    });

    let decision = evaluate(&application, &policy);

    assert_eq!(decision.decision, DecisionKind::Approved);
    assert_eq!(
        decision.applied_rules[0],
        "Credit score 620 → high-risk; DTI limit 0.0%."
    );
    assert!(decision
        .reasoning
        .contains("22.5% (exceeds 0.0% limit for high-risk)"));
}

#[test]
fn missing_tier_limit_counts_as_zero() {
    let mut policy = Policy::default();
    policy.tiers.low.dti_limit = None;
    let debt_free = application_with(|app| app.monthly_debt = 0.0);

    let decision = evaluate(&debt_free, &policy);
    assert_eq!(decision.decision, DecisionKind::Approved);

    let decision = evaluate(&application(), &policy);
    assert_eq!(decision.decision, DecisionKind::Denied);
}

#[test]
fn zero_income_reaches_dti_as_infinity_when_floor_allows() {
    let mut policy = Policy::default();
    policy.income_min = 0;
    let application = application_with(|app| {
        app.annual_income = 0.0;
        app.monthly_debt = 100.0;
    });

    let decision = evaluate(&application, &policy);

    assert_eq!(decision.decision, DecisionKind::Denied);
    assert_eq!(decision.applied_rules[1], "Applicant DTI inf%.");
}

#[test]
fn reserved_dti_excess_field_does_not_affect_decisions() {
    let mut policy = Policy::default();
    policy.auto_deny_dti_excess = 0;
    let application = application_with(|app| {
        app.annual_income = 120_000.0;
        app.monthly_debt = 4_000.0;
    });

    assert_eq!(
        evaluate(&application, &policy),
        evaluate(&application, &Policy::default())
    );
}

#[test]
fn evaluation_is_idempotent() {
    let policy = Policy::default();
    let application = application_with(|app| app.is_first_time_buyer = true);

    let first = evaluate(&application, &policy);
    let second = evaluate(&application, &policy);

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).expect("serializes"),
        serde_json::to_string(&second).expect("serializes")
    );
}

#[test]
fn reasoning_always_has_three_lines() {
    let policy = Policy::default();
    let applications = [
        application(),
        application_with(|app| app.credit_score = 500),
        application_with(|app| app.annual_income = 1_000.0),
        application_with(|app| app.employment_months = 0),
        application_with(|app| app.monthly_debt = 10_000.0),
    ];

    for application in &applications {
        let decision = evaluate(application, &policy);
        assert_eq!(decision.reasoning.split('\n').count(), 3);
    }
}
