//! Loan underwriting: policy model, policy resolution, and the decision engine.

pub mod agent;
pub mod domain;
pub mod engine;
pub mod gemini;
pub mod policy;
pub mod resolver;
pub mod retry;

#[cfg(test)]
mod tests;

pub use agent::{AgentError, AgentOutcome, PolicyInput, UnderwritingAgent};
pub use domain::{
    ApplicantId, Application, ApplicationError, Decision, DecisionKind, RiskLevel, TraceStep,
};
pub use engine::{classify_risk, compute_dti, evaluate};
pub use gemini::GeminiClient;
pub use policy::{Policy, PolicyTier, PolicyTiers, TierMismatch};
pub use resolver::{
    FallbackReason, PolicyResolution, PolicyResolver, PolicySource, PolicyStructurer,
    ResolveError, StructurerError,
};
pub use retry::RetryPolicy;
