use clarity_core::SynthesisRequest;

use crate::parse::{AuditPayload, BlueprintPayload};

fn schema_json<T: schemars::JsonSchema>() -> String {
    let schema = schemars::schema_for!(T);
    serde_json::to_string_pretty(&schema).unwrap_or_else(|_| "{}".to_string())
}

pub fn audit_system_prompt() -> String {
    format!(
        "You are a senior AI consultant for small and mid-sized businesses. \
Perform a readiness audit from the intake answers you are given.\n\n\
Scoring guidance:\n\
- readinessScore is 0-100. Paper or spreadsheet data keeps it low; \
cloud apps or a central database push it high.\n\
- analysis is a two-sentence executive assessment of their situation.\n\
- useCases lists exactly 3 actionable AI projects tailored to their \
specific data source and goal, each with title, impact, difficulty, roi.\n\n\
Output ONLY a single JSON object conforming to this schema, nothing else:\n{}",
        schema_json::<AuditPayload>()
    )
}

/// Compact line-oriented rendering of the intake answers.
pub fn audit_user_message(req: &SynthesisRequest) -> String {
    let mut out = String::with_capacity(512);
    if let Some(profile) = &req.profile {
        out.push_str("USER: ");
        out.push_str(&profile.name);
        if !profile.company.is_empty() {
            out.push_str(" (");
            out.push_str(&profile.company);
            out.push(')');
        }
        out.push('\n');
    }
    out.push_str("INDUSTRY: ");
    out.push_str(&req.answer_text("industry", "unknown"));
    out.push_str("\nSIZE: ");
    out.push_str(&req.answer_text("size", "unknown"));
    out.push_str("\nDATA STORED IN: ");
    out.push_str(&req.answer_text("data-source", "unknown"));
    out.push_str(" (critical for feasibility)\nPRIMARY GOAL: ");
    out.push_str(&req.answer_text("goal", "unknown"));
    out.push_str("\nIT MATURITY: ");
    out.push_str(&req.answer_text("maturity", "unknown"));
    out.push_str("\nPROBLEM: \"");
    out.push_str(&req.answer_text("pain-point", "not described"));
    out.push_str("\"\n");
    out
}

pub fn blueprint_system_prompt() -> String {
    format!(
        "You are an agent architect. Synthesize a professional agentic-AI \
specification from the configuration you are given.\n\n\
- systemPrompt: the full system prompt the agent should run with.\n\
- logicFlow: the ordered steps of the agent's operating loop.\n\
- securityGuardrails: concrete restrictions the agent must obey.\n\
- estimatedROI: a one-line impact assessment.\n\n\
Output ONLY a single JSON object conforming to this schema, nothing else:\n{}",
        schema_json::<BlueprintPayload>()
    )
}

pub fn blueprint_user_message(req: &SynthesisRequest) -> String {
    let mut out = String::with_capacity(512);
    out.push_str("AGENT NAME: ");
    out.push_str(&req.answer_text("name", "Unnamed Agent"));
    out.push_str("\nROLE: ");
    out.push_str(&req.answer_text("role", "Task Specialist"));
    out.push_str("\nCAPABILITIES: ");
    out.push_str(&req.answer_text("capabilities", "none selected"));
    out.push_str("\nINTEGRATIONS: ");
    out.push_str(&req.answer_text("integrations", "none selected"));
    out.push_str("\nPRIMARY OBJECTIVE: ");
    out.push_str(&req.answer_text("objective", "not described"));
    out.push('\n');
    out
}
