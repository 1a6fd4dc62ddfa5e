use crate::cli::ServeArgs;
use crate::infra::{build_agent, AppState};
use crate::routes::{underwriting_router, with_operational_routes};
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};
use underwriter::config::AppConfig;
use underwriter::error::AppError;
use underwriter::telemetry;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    if config.gemini.api_key.is_none() {
        warn!("GEMINI_API_KEY is not set; requests with policy_text will be rejected");
    }

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let agent = Arc::new(build_agent(&config));

    let app = with_operational_routes(underwriting_router(agent))
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        model = %config.gemini.model,
        "underwriting service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
