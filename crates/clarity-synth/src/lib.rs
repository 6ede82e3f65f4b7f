pub mod client;
pub mod fallback;
mod parse;
mod prompt;

use thiserror::Error;

use clarity_core::{AgentBlueprint, ReadinessReport, SynthesisRequest};

pub use client::{CompletionClient, LlmClient};

/// Why a synthesis attempt fell back. Internal to this crate's callers'
/// logs; never surfaced to the end user.
#[derive(Debug, Error)]
pub enum SynthesisFailure {
    #[error("completion call failed: {0}")]
    Call(String),
    #[error("no JSON object found in model output")]
    MissingJson,
    #[error("malformed payload: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("schema violation: {0}")]
    Schema(String),
}

async fn attempt<T>(
    client: &dyn CompletionClient,
    system: &str,
    user: &str,
    parse: fn(&str) -> Result<T, SynthesisFailure>,
) -> Result<T, SynthesisFailure> {
    let raw = client
        .complete(system, user)
        .await
        .map_err(SynthesisFailure::Call)?;
    parse(&raw)
}

/// Produce a readiness report from a completed audit wizard. One attempt
/// against the external model; any failure is logged and replaced with a
/// locally generated report. Never errors — availability over accuracy.
pub async fn synthesize_audit(
    client: &dyn CompletionClient,
    req: &SynthesisRequest,
) -> ReadinessReport {
    let system = prompt::audit_system_prompt();
    let user = prompt::audit_user_message(req);

    match attempt(client, &system, &user, parse::parse_audit).await {
        Ok(report) => report,
        Err(e) => {
            tracing::warn!(error = %e, "audit synthesis failed, serving fallback");
            fallback::fallback_audit(req)
        }
    }
}

/// Produce an agent blueprint from a completed agent-studio wizard. Same
/// single-attempt, always-answer policy as `synthesize_audit`.
pub async fn synthesize_blueprint(
    client: &dyn CompletionClient,
    req: &SynthesisRequest,
) -> AgentBlueprint {
    let system = prompt::blueprint_system_prompt();
    let user = prompt::blueprint_user_message(req);

    match attempt(client, &system, &user, parse::parse_blueprint).await {
        Ok(blueprint) => blueprint,
        Err(e) => {
            tracing::warn!(error = %e, "blueprint synthesis failed, serving fallback");
            fallback::fallback_blueprint(req)
        }
    }
}
