use crate::infra::build_agent;
use clap::Args;
use serde_json::json;
use std::path::PathBuf;
use underwriter::config::AppConfig;
use underwriter::error::AppError;
use underwriter::telemetry;
use underwriter::underwriting::{
    AgentError, AgentOutcome, Application, FallbackReason, PolicyInput, PolicyResolution,
};

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// Path to the lending policy document
    #[arg(long)]
    pub(crate) policy: PathBuf,
    /// Path to the application JSON
    #[arg(long)]
    pub(crate) app: PathBuf,
    /// Skip the policy service and evaluate against the default policy
    #[arg(long)]
    pub(crate) offline: bool,
    /// Print the outcome as JSON instead of the text report
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct PolicyArgs {
    /// Path to the lending policy document
    #[arg(long)]
    pub(crate) policy: PathBuf,
    /// Skip the policy service and print the default policy
    #[arg(long)]
    pub(crate) offline: bool,
}

pub(crate) async fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let EvaluateArgs {
        policy,
        app,
        offline,
        json,
    } = args;

    let application = Application::from_path(&app)?;
    let agent = build_agent(&config);

    let outcome = tokio::task::spawn_blocking(move || {
        let input = if offline {
            PolicyInput::Offline
        } else {
            PolicyInput::Document(&policy)
        };
        agent.run(input, &application)
    })
    .await??;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        println!("{}", render_outcome(&outcome));
    }

    Ok(())
}

pub(crate) async fn run_policy(args: PolicyArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let PolicyArgs { policy, offline } = args;
    let agent = build_agent(&config);

    let resolution = if offline {
        PolicyResolution::fallback(FallbackReason::ServiceDisabled)
    } else {
        tokio::task::spawn_blocking(move || agent.resolver().resolve_document(&policy))
            .await?
            .map_err(AgentError::from)?
    };

    let payload = json!({
        "source": resolution.source,
        "source_label": resolution.source.to_string(),
        "policy": resolution.policy,
    });
    println!("{}", serde_json::to_string_pretty(&payload)?);

    Ok(())
}

pub(crate) fn render_outcome(outcome: &AgentOutcome) -> String {
    let decision = &outcome.decision;
    let mut lines = Vec::new();

    lines.push(String::new());
    lines.push("================= Underwriting Decision =================".to_string());
    lines.push(format!(
        "Decision:   {}",
        decision.decision.label().to_uppercase()
    ));
    lines.push(format!(
        "Risk Level: {}",
        decision.risk_level.display_name()
    ));
    lines.push(format!("Policy:     {}", outcome.policy_source));
    lines.push(String::new());

    lines.push("Reasoning:".to_string());
    lines.extend(decision.reasoning_lines().map(str::to_string));

    if !decision.applied_rules.is_empty() {
        lines.push(String::new());
        lines.push("Applied Rules:".to_string());
        for rule in &decision.applied_rules {
            lines.push(format!(" - {rule}"));
        }
    }

    lines.push("==========================================================".to_string());
    lines.push(String::new());
    lines.push("TRACE:".to_string());
    for step in &outcome.trace {
        lines.push(format!("- {}: {}", step.step, step.detail));
    }

    lines.join("\n")
}
