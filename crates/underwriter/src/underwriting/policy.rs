use serde::{Deserialize, Serialize};

use super::domain::RiskLevel;

/// Thresholds applied to applicants in a single risk tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyTier {
    pub risk: RiskLevel,
    #[serde(default)]
    pub dti_limit: Option<f64>,
    pub employment_months: u32,
    #[serde(default)]
    pub income_override: Option<u64>,
}

impl PolicyTier {
    /// Fallback tenure requirement used when a structured tier omits it.
    pub const fn default_employment_months(risk: RiskLevel) -> u32 {
        match risk {
            RiskLevel::Low => 12,
            RiskLevel::Medium => 18,
            RiskLevel::High => 24,
        }
    }

    /// DTI limit used in arithmetic, with an absent limit counting as zero.
    pub fn effective_dti_limit(&self) -> f64 {
        self.dti_limit.unwrap_or(0.0)
    }
}

/// One tier per risk level. Every level is always present and each tier's
/// `risk` matches the slot it sits in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "UncheckedTiers")]
pub struct PolicyTiers {
    pub low: PolicyTier,
    pub medium: PolicyTier,
    pub high: PolicyTier,
}

#[derive(Deserialize)]
struct UncheckedTiers {
    low: PolicyTier,
    medium: PolicyTier,
    high: PolicyTier,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("tier `{slot}` is tagged with risk `{found}`")]
pub struct TierMismatch {
    pub slot: RiskLevel,
    pub found: RiskLevel,
}

impl TryFrom<UncheckedTiers> for PolicyTiers {
    type Error = TierMismatch;

    fn try_from(tiers: UncheckedTiers) -> Result<Self, Self::Error> {
        for (slot, tier) in [
            (RiskLevel::Low, &tiers.low),
            (RiskLevel::Medium, &tiers.medium),
            (RiskLevel::High, &tiers.high),
        ] {
            if tier.risk != slot {
                return Err(TierMismatch {
                    slot,
                    found: tier.risk,
                });
            }
        }

        Ok(Self {
            low: tiers.low,
            medium: tiers.medium,
            high: tiers.high,
        })
    }
}

impl PolicyTiers {
    pub fn get(&self, risk: RiskLevel) -> &PolicyTier {
        match risk {
            RiskLevel::Low => &self.low,
            RiskLevel::Medium => &self.medium,
            RiskLevel::High => &self.high,
        }
    }
}

/// Lending policy consumed by the decision engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Policy {
    pub tiers: PolicyTiers,
    pub income_min: u64,
    pub auto_deny_credit: i32,
    /// Carried for policy-shape compatibility; no rule consults it.
    pub auto_deny_dti_excess: i64,
    pub first_time_buyer_leniency: f64,
    pub self_employed_months: u32,
}

impl Policy {
    pub const DEFAULT_INCOME_MIN: u64 = 35_000;
    pub const DEFAULT_AUTO_DENY_CREDIT: i32 = 600;
    pub const DEFAULT_AUTO_DENY_DTI_EXCESS: i64 = 5;
    pub const DEFAULT_FIRST_TIME_BUYER_LENIENCY: f64 = 5.0;
    pub const DEFAULT_SELF_EMPLOYED_MONTHS: u32 = 24;

    pub fn tier(&self, risk: RiskLevel) -> &PolicyTier {
        self.tiers.get(risk)
    }
}

impl Default for Policy {
    /// Fully specified policy used whenever structured extraction is unavailable.
    fn default() -> Self {
        Self {
            tiers: PolicyTiers {
                low: PolicyTier {
                    risk: RiskLevel::Low,
                    dti_limit: Some(40.0),
                    employment_months: 12,
                    income_override: None,
                },
                medium: PolicyTier {
                    risk: RiskLevel::Medium,
                    dti_limit: Some(30.0),
                    employment_months: 18,
                    income_override: None,
                },
                high: PolicyTier {
                    risk: RiskLevel::High,
                    dti_limit: Some(25.0),
                    employment_months: 24,
                    income_override: Some(150_000),
                },
            },
            income_min: Self::DEFAULT_INCOME_MIN,
            auto_deny_credit: Self::DEFAULT_AUTO_DENY_CREDIT,
            auto_deny_dti_excess: Self::DEFAULT_AUTO_DENY_DTI_EXCESS,
            first_time_buyer_leniency: Self::DEFAULT_FIRST_TIME_BUYER_LENIENCY,
            self_employed_months: Self::DEFAULT_SELF_EMPLOYED_MONTHS,
        }
    }
}
