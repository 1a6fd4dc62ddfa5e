use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Identifier wrapper for the applicant under evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicantId(pub String);

impl fmt::Display for ApplicantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Financial facts submitted for a single loan application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub applicant_id: ApplicantId,
    pub requested_amount: f64,
    pub annual_income: f64,
    pub monthly_debt: f64,
    pub credit_score: i32,
    pub employment_months: u32,
    #[serde(default)]
    pub is_first_time_buyer: bool,
    #[serde(default)]
    pub is_self_employed: bool,
}

impl Application {
    /// Parse and validate an application document.
    pub fn from_json(raw: &str) -> Result<Self, ApplicationError> {
        let application: Application = serde_json::from_str(raw)?;
        application.validate()?;
        Ok(application)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ApplicationError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// Reject money fields that are negative or not finite.
    pub fn validate(&self) -> Result<(), ApplicationError> {
        let amounts = [
            ("requestedAmount", self.requested_amount),
            ("annualIncome", self.annual_income),
            ("monthlyDebt", self.monthly_debt),
        ];

        for (field, value) in amounts {
            if !value.is_finite() {
                return Err(ApplicationError::Invalid {
                    field,
                    reason: "must be a finite number",
                });
            }
            if value < 0.0 {
                return Err(ApplicationError::Invalid {
                    field,
                    reason: "must not be negative",
                });
            }
        }

        Ok(())
    }
}

/// Raised when an application cannot be loaded or fails validation.
#[derive(Debug, thiserror::Error)]
pub enum ApplicationError {
    #[error("failed to read application: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed application JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid application field `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Risk category derived from the applicant's credit score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub const fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }

    /// Credit score band used in reasoning text.
    pub const fn score_range(self) -> &'static str {
        match self {
            RiskLevel::Low => "≥ 720",
            RiskLevel::Medium => "650-719",
            RiskLevel::High => "< 650",
        }
    }

    pub const fn display_name(self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Final underwriting outcome tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecisionKind {
    Approved,
    Denied,
}

impl DecisionKind {
    pub const fn label(self) -> &'static str {
        match self {
            DecisionKind::Approved => "approved",
            DecisionKind::Denied => "denied",
        }
    }
}

impl fmt::Display for DecisionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Decision output with the audit trail of rules that fired.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Decision {
    pub decision: DecisionKind,
    pub reasoning: String,
    pub risk_level: RiskLevel,
    pub applied_rules: Vec<String>,
}

impl Decision {
    pub fn is_approved(&self) -> bool {
        self.decision == DecisionKind::Approved
    }

    pub fn reasoning_lines(&self) -> impl Iterator<Item = &str> {
        self.reasoning.lines()
    }
}

/// One observability entry recorded by the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceStep {
    pub step: String,
    pub detail: String,
}

impl TraceStep {
    pub fn new(step: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            step: step.into(),
            detail: detail.into(),
        }
    }
}
