use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use underwriter::config::AppConfig;
use underwriter::underwriting::{GeminiClient, PolicyResolver, UnderwritingAgent};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) type GeminiAgent = UnderwritingAgent<GeminiClient>;

/// Wire the Gemini-backed resolver into an agent. No network traffic happens
/// until a policy is actually resolved.
pub(crate) fn build_agent(config: &AppConfig) -> GeminiAgent {
    let client = GeminiClient::new(config.gemini.clone());
    UnderwritingAgent::new(PolicyResolver::new(client))
}
