use crate::infra::AppState;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use underwriter::error::AppError;
use underwriter::underwriting::{
    AgentOutcome, Application, Policy, PolicyInput, PolicyStructurer, UnderwritingAgent,
};

#[derive(Debug, Deserialize)]
pub(crate) struct EvaluateRequest {
    pub(crate) application: Application,
    #[serde(default)]
    pub(crate) policy: Option<Policy>,
    #[serde(default)]
    pub(crate) policy_text: Option<String>,
}

pub(crate) fn underwriting_router<S>(agent: Arc<UnderwritingAgent<S>>) -> Router
where
    S: PolicyStructurer + 'static,
{
    Router::new()
        .route("/api/v1/underwriting/evaluate", post(evaluate_handler::<S>))
        .route(
            "/api/v1/underwriting/policy/default",
            get(default_policy_handler),
        )
        .with_state(agent)
}

pub(crate) fn with_operational_routes(router: Router) -> Router {
    router
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn evaluate_handler<S>(
    State(agent): State<Arc<UnderwritingAgent<S>>>,
    Json(request): Json<EvaluateRequest>,
) -> Result<Json<AgentOutcome>, AppError>
where
    S: PolicyStructurer + 'static,
{
    let outcome = tokio::task::spawn_blocking(move || {
        let EvaluateRequest {
            application,
            policy,
            policy_text,
        } = request;

        let input = match (&policy, &policy_text) {
            (Some(policy), _) => PolicyInput::Supplied(policy),
            (None, Some(text)) => PolicyInput::Text(text),
            (None, None) => PolicyInput::Offline,
        };
        agent.run(input, &application)
    })
    .await??;

    Ok(Json(outcome))
}

pub(crate) async fn default_policy_handler() -> Json<Policy> {
    Json(Policy::default())
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
