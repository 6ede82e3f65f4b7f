//! Locally synthesized placeholder results, used whenever the external call
//! fails so the user always sees output.

use rand::Rng;

use clarity_core::{AgentBlueprint, Origin, ReadinessReport, Recommendation, SynthesisRequest};

/// Score band for locally generated audits. Plausible without promising
/// either "hopeless" or "perfect".
pub const FALLBACK_SCORE_MIN: u32 = 45;
pub const FALLBACK_SCORE_MAX: u32 = 85;

pub fn fallback_audit(req: &SynthesisRequest) -> ReadinessReport {
    let industry = req.answer_text("industry", "business");
    let data_source = req.answer_text("data-source", "operational");
    let goal = req.answer_text("goal", "improve efficiency");

    let score = rand::thread_rng().gen_range(FALLBACK_SCORE_MIN..=FALLBACK_SCORE_MAX) as f64;

    ReadinessReport {
        score,
        summary: format!(
            "We analyzed your {industry} operations and identified significant \
bottlenecks in your {data_source} data workflows. Your goal to {goal} is \
achievable but requires immediate infrastructure visualization."
        ),
        recommendations: vec![
            Recommendation {
                title: format!("Automated {data_source} Data Pipeline"),
                impact: "Eliminates manual entry errors and saves 12+ hours/week.".to_string(),
                difficulty: "Medium".to_string(),
                roi: "300%".to_string(),
            },
            Recommendation {
                title: "Customer Service Agent".to_string(),
                impact: "Instant response to common inquiries, freeing up staff.".to_string(),
                difficulty: "Low".to_string(),
                roi: "150%".to_string(),
            },
            Recommendation {
                title: "Predictive Analytics Dashboard".to_string(),
                impact: "Forecast demand using your historical data.".to_string(),
                difficulty: "High".to_string(),
                roi: "500%".to_string(),
            },
        ],
        origin: Origin::Fallback,
    }
}

pub fn fallback_blueprint(req: &SynthesisRequest) -> AgentBlueprint {
    let name = req.answer_text("name", "Agent");
    let role = req.answer_text("role", "Task Specialist");
    let capabilities = req.answer_text("capabilities", "general automation");
    let integrations = req.answer_text("integrations", "internal systems");
    let objective = req.answer_text("objective", "support the team");

    AgentBlueprint {
        system_prompt: format!(
            "You are {name}, a {role} agent. Your capabilities: {capabilities}. \
You operate exclusively through these integrations: {integrations}. \
Primary objective: {objective}. Stay within your approved tools, ask for \
clarification when a request is ambiguous, and report progress after each \
completed step."
        ),
        logic_flow: vec![
            "Receive a task or trigger event from a connected integration".to_string(),
            format!("Gather context using {capabilities}"),
            "Plan the minimal sequence of actions for the objective".to_string(),
            format!("Execute the plan through {integrations}"),
            "Summarize the outcome and hand off anything unresolved".to_string(),
        ],
        guardrails: vec![
            "Never act outside the approved integrations".to_string(),
            "Escalate low-confidence decisions to a human".to_string(),
            "Redact personal data from logs and summaries".to_string(),
            "Require explicit approval before irreversible actions".to_string(),
        ],
        roi_estimate: "Reclaims 10+ hours per week of manual coordination".to_string(),
        origin: Origin::Fallback,
    }
}
