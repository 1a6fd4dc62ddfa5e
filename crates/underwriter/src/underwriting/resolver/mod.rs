//! Policy resolution: structure raw policy text through an external service and
//! degrade to the default policy whenever that fails.

mod extract;
mod prompt;
mod schema;

pub use extract::{document_text, json_block};
pub use prompt::policy_prompt;
pub use schema::{policy_from_payload, SchemaError};

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::policy::Policy;

/// Seam for the external text-understanding service.
pub trait PolicyStructurer: Send + Sync {
    /// Send the prompt and return the raw response text.
    fn structure(&self, prompt: &str) -> Result<String, StructurerError>;
}

/// Failures reported by a [`PolicyStructurer`].
#[derive(Debug, thiserror::Error)]
pub enum StructurerError {
    #[error("GEMINI_API_KEY is not configured")]
    MissingApiKey,
    #[error("request to text-understanding service failed: {0}")]
    Transport(String),
    #[error("text-understanding service rate limited the request")]
    RateLimited,
    #[error("text-understanding service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("text-understanding service response could not be decoded: {0}")]
    Decode(String),
    #[error("text-understanding service returned no text")]
    EmptyResponse,
}

impl StructurerError {
    /// Transient failures worth another attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            StructurerError::Transport(_) | StructurerError::RateLimited => true,
            StructurerError::Status { status, .. } => *status >= 500,
            StructurerError::MissingApiKey
            | StructurerError::Decode(_)
            | StructurerError::EmptyResponse => false,
        }
    }
}

/// Why the default policy was used instead of a structured one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackReason {
    DocumentUnreadable,
    ServiceDisabled,
    ServiceUnavailable,
    UnparseableResponse,
    EmptyPayload,
    InvalidPayload,
}

impl FallbackReason {
    pub const fn label(self) -> &'static str {
        match self {
            FallbackReason::DocumentUnreadable => "policy document could not be read",
            FallbackReason::ServiceDisabled => "policy service disabled",
            FallbackReason::ServiceUnavailable => "policy service unavailable",
            FallbackReason::UnparseableResponse => "policy service returned no JSON object",
            FallbackReason::EmptyPayload => "policy service returned an empty object",
            FallbackReason::InvalidPayload => "policy service returned an invalid policy",
        }
    }
}

/// Where the resolved policy came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "reason", rename_all = "snake_case")]
pub enum PolicySource {
    Structured,
    Supplied,
    Fallback(FallbackReason),
}

impl fmt::Display for PolicySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicySource::Structured => f.write_str("structured from policy text"),
            PolicySource::Supplied => f.write_str("supplied by caller"),
            PolicySource::Fallback(reason) => write!(f, "default policy ({})", reason.label()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PolicyResolution {
    pub policy: Policy,
    pub source: PolicySource,
}

impl PolicyResolution {
    pub fn fallback(reason: FallbackReason) -> Self {
        Self {
            policy: Policy::default(),
            source: PolicySource::Fallback(reason),
        }
    }
}

/// The only resolution failure: the service cannot be invoked at all.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("policy service credentials are missing: {0}")]
    MissingCredential(#[source] StructurerError),
}

/// Obtains a [`Policy`] from raw policy text.
pub struct PolicyResolver<S> {
    structurer: S,
}

impl<S> PolicyResolver<S>
where
    S: PolicyStructurer,
{
    pub fn new(structurer: S) -> Self {
        Self { structurer }
    }

    pub fn structurer(&self) -> &S {
        &self.structurer
    }

    /// Read a policy document and resolve its text.
    pub fn resolve_document<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> Result<PolicyResolution, ResolveError> {
        let path = path.as_ref();
        match document_text(path) {
            Ok(text) => self.resolve_text(&text),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "policy document unreadable; using default policy");
                Ok(PolicyResolution::fallback(FallbackReason::DocumentUnreadable))
            }
        }
    }

    /// Structure raw policy text, falling back to the default policy on any
    /// service or payload failure other than missing credentials.
    pub fn resolve_text(&self, policy_text: &str) -> Result<PolicyResolution, ResolveError> {
        let prompt = policy_prompt(policy_text);
        debug!(
            text_len = policy_text.len(),
            "requesting structured policy"
        );

        let response = match self.structurer.structure(&prompt) {
            Ok(response) => response,
            Err(err @ StructurerError::MissingApiKey) => {
                return Err(ResolveError::MissingCredential(err))
            }
            Err(err) => {
                warn!(error = %err, "policy service failed; using default policy");
                return Ok(PolicyResolution::fallback(
                    FallbackReason::ServiceUnavailable,
                ));
            }
        };

        let Some(payload) = json_block(&response) else {
            warn!(
                response_len = response.len(),
                "policy service returned no JSON object; using default policy"
            );
            return Ok(PolicyResolution::fallback(
                FallbackReason::UnparseableResponse,
            ));
        };

        match policy_from_payload(payload) {
            Ok(policy) => {
                info!("policy structured from document text");
                Ok(PolicyResolution {
                    policy,
                    source: PolicySource::Structured,
                })
            }
            Err(SchemaError::Empty) => {
                warn!("policy service returned an empty object; using default policy");
                Ok(PolicyResolution::fallback(FallbackReason::EmptyPayload))
            }
            Err(err) => {
                warn!(error = %err, "policy payload rejected; using default policy");
                Ok(PolicyResolution::fallback(FallbackReason::InvalidPayload))
            }
        }
    }
}
