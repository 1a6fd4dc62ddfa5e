use serde::Deserialize;
use serde_json::Value;

use super::super::domain::RiskLevel;
use super::super::policy::{Policy, PolicyTier, PolicyTiers};

/// Policy payload as returned by the text-understanding service.
///
/// Every field is optional so partial payloads can be completed from defaults.
/// Fields with the wrong JSON type fail deserialization outright.
#[derive(Debug, Default, Deserialize)]
struct PolicyPayload {
    tiers: Option<TiersPayload>,
    income_min: Option<f64>,
    auto_deny_credit: Option<f64>,
    auto_deny_dti_excess: Option<f64>,
    first_time_buyer_leniency: Option<f64>,
    self_employed_months: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct TiersPayload {
    low: Option<TierPayload>,
    medium: Option<TierPayload>,
    high: Option<TierPayload>,
}

#[derive(Debug, Default, Deserialize)]
struct TierPayload {
    dti_limit: Option<f64>,
    employment_months: Option<f64>,
    income_override: Option<f64>,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum SchemaError {
    #[error("policy payload is empty")]
    Empty,
    #[error("policy payload is not a JSON object")]
    NotAnObject,
    #[error("policy payload does not match the expected shape: {0}")]
    Shape(String),
    #[error("policy field `{field}` is out of range: {value}")]
    OutOfRange { field: &'static str, value: f64 },
}

/// Map a service payload onto a complete [`Policy`], filling gaps from defaults.
pub fn policy_from_payload(value: Value) -> Result<Policy, SchemaError> {
    match &value {
        Value::Object(map) if map.is_empty() => return Err(SchemaError::Empty),
        Value::Object(_) => {}
        _ => return Err(SchemaError::NotAnObject),
    }

    let payload: PolicyPayload =
        serde_json::from_value(value).map_err(|err| SchemaError::Shape(err.to_string()))?;
    let tiers = payload.tiers.unwrap_or_default();

    Ok(Policy {
        tiers: PolicyTiers {
            low: tier_from_payload(RiskLevel::Low, tiers.low)?,
            medium: tier_from_payload(RiskLevel::Medium, tiers.medium)?,
            high: tier_from_payload(RiskLevel::High, tiers.high)?,
        },
        income_min: match payload.income_min {
            Some(value) => unsigned("income_min", value)?,
            None => Policy::DEFAULT_INCOME_MIN,
        },
        auto_deny_credit: match payload.auto_deny_credit {
            Some(value) => signed("auto_deny_credit", value)?,
            None => Policy::DEFAULT_AUTO_DENY_CREDIT,
        },
        auto_deny_dti_excess: match payload.auto_deny_dti_excess {
            Some(value) => signed("auto_deny_dti_excess", value)?,
            None => Policy::DEFAULT_AUTO_DENY_DTI_EXCESS,
        },
        first_time_buyer_leniency: payload
            .first_time_buyer_leniency
            .unwrap_or(Policy::DEFAULT_FIRST_TIME_BUYER_LENIENCY),
        self_employed_months: match payload.self_employed_months {
            Some(value) => unsigned("self_employed_months", value)?,
            None => Policy::DEFAULT_SELF_EMPLOYED_MONTHS,
        },
    })
}

fn tier_from_payload(
    risk: RiskLevel,
    payload: Option<TierPayload>,
) -> Result<PolicyTier, SchemaError> {
    let payload = payload.unwrap_or_default();

    Ok(PolicyTier {
        risk,
        dti_limit: payload.dti_limit,
        employment_months: match payload.employment_months {
            Some(value) => unsigned("employment_months", value)?,
            None => PolicyTier::default_employment_months(risk),
        },
        income_override: payload
            .income_override
            .map(|value| unsigned("income_override", value))
            .transpose()?,
    })
}

/// Truncate toward zero into an unsigned integer type.
fn unsigned<T: TryFrom<u64>>(field: &'static str, value: f64) -> Result<T, SchemaError> {
    let truncated = value.trunc();
    if !truncated.is_finite() || truncated < 0.0 || truncated > u64::MAX as f64 {
        return Err(SchemaError::OutOfRange { field, value });
    }
    T::try_from(truncated as u64).map_err(|_| SchemaError::OutOfRange { field, value })
}

fn signed<T: TryFrom<i64>>(field: &'static str, value: f64) -> Result<T, SchemaError> {
    let truncated = value.trunc();
    if !truncated.is_finite() || truncated < i64::MIN as f64 || truncated > i64::MAX as f64 {
        return Err(SchemaError::OutOfRange { field, value });
    }
    T::try_from(truncated as i64).map_err(|_| SchemaError::OutOfRange { field, value })
}
