use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::domain::{Application, ApplicationError, Decision, TraceStep};
use super::engine::evaluate;
use super::policy::Policy;
use super::resolver::{
    FallbackReason, PolicyResolution, PolicyResolver, PolicySource, PolicyStructurer,
    ResolveError,
};

pub const PARSE_POLICY_STEP: &str = "parse_policy";
pub const EVALUATE_STEP: &str = "evaluate";
pub const PARSE_POLICY_DETAIL: &str =
    "Parsed policy with Gemini (fallback=DEFAULT_POLICY if needed)";

/// Where the orchestrator should take the policy from.
#[derive(Debug, Clone, Copy)]
pub enum PolicyInput<'a> {
    /// A policy document on disk, structured through the resolver.
    Document(&'a Path),
    /// Raw policy text, structured through the resolver.
    Text(&'a str),
    /// An already-structured policy supplied by the caller.
    Supplied(&'a Policy),
    /// Skip the external service and use the default policy.
    Offline,
}

/// Decision plus the policy it was made against and the step trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentOutcome {
    pub decision: Decision,
    pub policy: Policy,
    pub policy_source: PolicySource,
    pub trace: Vec<TraceStep>,
}

#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    #[error(transparent)]
    InvalidApplication(#[from] ApplicationError),
    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

/// Sequences policy resolution and evaluation for one application.
pub struct UnderwritingAgent<S> {
    resolver: PolicyResolver<S>,
}

impl<S> UnderwritingAgent<S>
where
    S: PolicyStructurer,
{
    pub fn new(resolver: PolicyResolver<S>) -> Self {
        Self { resolver }
    }

    pub fn run(
        &self,
        input: PolicyInput<'_>,
        application: &Application,
    ) -> Result<AgentOutcome, AgentError> {
        application.validate()?;

        let (resolution, detail) = match input {
            PolicyInput::Document(path) => {
                (self.resolver.resolve_document(path)?, PARSE_POLICY_DETAIL)
            }
            PolicyInput::Text(text) => (self.resolver.resolve_text(text)?, PARSE_POLICY_DETAIL),
            PolicyInput::Supplied(policy) => (
                PolicyResolution {
                    policy: policy.clone(),
                    source: PolicySource::Supplied,
                },
                "Using supplied policy",
            ),
            PolicyInput::Offline => (
                PolicyResolution::fallback(FallbackReason::ServiceDisabled),
                "Using DEFAULT_POLICY (policy service disabled)",
            ),
        };

        let mut trace = vec![TraceStep::new(PARSE_POLICY_STEP, detail)];

        let decision = evaluate(application, &resolution.policy);
        trace.push(TraceStep::new(
            EVALUATE_STEP,
            format!(
                "risk={}, decision={}",
                decision.risk_level, decision.decision
            ),
        ));

        info!(
            applicant_id = %application.applicant_id,
            risk = %decision.risk_level,
            decision = %decision.decision,
            policy_source = %resolution.source,
            "underwriting decision recorded"
        );

        Ok(AgentOutcome {
            decision,
            policy: resolution.policy,
            policy_source: resolution.source,
            trace,
        })
    }

    /// Evaluate against the policy in a document on disk.
    pub fn run_document<P: AsRef<Path>>(
        &self,
        path: P,
        application: &Application,
    ) -> Result<AgentOutcome, AgentError> {
        self.run(PolicyInput::Document(path.as_ref()), application)
    }

    /// Evaluate against raw policy text.
    pub fn run_text(
        &self,
        policy_text: &str,
        application: &Application,
    ) -> Result<AgentOutcome, AgentError> {
        self.run(PolicyInput::Text(policy_text), application)
    }

    pub fn run_with_policy(
        &self,
        policy: &Policy,
        application: &Application,
    ) -> Result<AgentOutcome, AgentError> {
        self.run(PolicyInput::Supplied(policy), application)
    }

    pub fn resolver(&self) -> &PolicyResolver<S> {
        &self.resolver
    }
}
