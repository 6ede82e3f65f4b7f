//! Tolerant parsing of model output into validated result types.
//!
//! Models wrap JSON in code fences or prose often enough that we strip the
//! common wrappers and cut out the outermost object before parsing. Anything
//! still malformed after that is a `SynthesisFailure` and the caller falls
//! back — parsing never panics and never surfaces to the end user.

use schemars::JsonSchema;
use serde::Deserialize;

use clarity_core::{AgentBlueprint, Origin, ReadinessReport, Recommendation};

use crate::SynthesisFailure;

/// Raw readiness-audit payload, field names as requested from the model.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AuditPayload {
    /// 0-100 readiness score.
    pub readiness_score: f64,
    /// Two-sentence executive summary.
    pub analysis: String,
    /// Three actionable AI projects.
    pub use_cases: Vec<UseCasePayload>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UseCasePayload {
    pub title: String,
    pub impact: String,
    pub difficulty: String,
    pub roi: String,
}

/// Raw agent-blueprint payload.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BlueprintPayload {
    pub system_prompt: String,
    pub logic_flow: Vec<String>,
    pub security_guardrails: Vec<String>,
    #[serde(rename = "estimatedROI", alias = "estimatedRoi")]
    pub estimated_roi: String,
}

/// Remove code-fence markers the way the model tends to emit them.
fn strip_fences(raw: &str) -> String {
    raw.replace("```json", "").replace("```", "")
}

/// Extract the outermost JSON object substring.
fn extract_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end <= start {
        return None;
    }
    Some(&raw[start..=end])
}

fn require(field: &'static str, value: &str) -> Result<(), SynthesisFailure> {
    if value.trim().is_empty() {
        return Err(SynthesisFailure::Schema(format!("empty field `{field}`")));
    }
    Ok(())
}

pub fn parse_audit(raw: &str) -> Result<ReadinessReport, SynthesisFailure> {
    let cleaned = strip_fences(raw);
    let json = extract_object(&cleaned).ok_or(SynthesisFailure::MissingJson)?;
    let payload: AuditPayload = serde_json::from_str(json)?;

    if !(0.0..=100.0).contains(&payload.readiness_score) {
        return Err(SynthesisFailure::Schema(format!(
            "readinessScore {} outside [0,100]",
            payload.readiness_score
        )));
    }
    require("analysis", &payload.analysis)?;
    if payload.use_cases.is_empty() {
        return Err(SynthesisFailure::Schema("empty useCases list".to_string()));
    }
    let recommendations = payload
        .use_cases
        .into_iter()
        .map(|uc| {
            require("title", &uc.title)?;
            require("impact", &uc.impact)?;
            require("difficulty", &uc.difficulty)?;
            require("roi", &uc.roi)?;
            Ok(Recommendation {
                title: uc.title,
                impact: uc.impact,
                difficulty: uc.difficulty,
                roi: uc.roi,
            })
        })
        .collect::<Result<Vec<_>, SynthesisFailure>>()?;

    Ok(ReadinessReport {
        score: payload.readiness_score,
        summary: payload.analysis,
        recommendations,
        origin: Origin::Real,
    })
}

pub fn parse_blueprint(raw: &str) -> Result<AgentBlueprint, SynthesisFailure> {
    let cleaned = strip_fences(raw);
    let json = extract_object(&cleaned).ok_or(SynthesisFailure::MissingJson)?;
    let payload: BlueprintPayload = serde_json::from_str(json)?;

    require("systemPrompt", &payload.system_prompt)?;
    require("estimatedROI", &payload.estimated_roi)?;
    if payload.logic_flow.is_empty() {
        return Err(SynthesisFailure::Schema("empty logicFlow list".to_string()));
    }
    if payload.security_guardrails.is_empty() {
        return Err(SynthesisFailure::Schema(
            "empty securityGuardrails list".to_string(),
        ));
    }

    Ok(AgentBlueprint {
        system_prompt: payload.system_prompt,
        logic_flow: payload.logic_flow,
        guardrails: payload.security_guardrails,
        roi_estimate: payload.estimated_roi,
        origin: Origin::Real,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const AUDIT_JSON: &str = r#"{
        "readinessScore": 72,
        "analysis": "Strong cloud footprint. Quick wins available.",
        "useCases": [
            {"title": "Lead triage", "impact": "Faster response", "difficulty": "Low", "roi": "200%"}
        ]
    }"#;

    #[test]
    fn parses_plain_json() {
        let report = parse_audit(AUDIT_JSON).unwrap();
        assert_eq!(report.score, 72.0);
        assert_eq!(report.origin, Origin::Real);
        assert_eq!(report.recommendations.len(), 1);
    }

    #[test]
    fn parses_fenced_json_with_prose() {
        let wrapped = format!("Here is your audit:\n```json\n{AUDIT_JSON}\n```\nEnjoy!");
        let report = parse_audit(&wrapped).unwrap();
        assert_eq!(report.summary, "Strong cloud footprint. Quick wins available.");
    }

    #[test]
    fn rejects_score_outside_band() {
        let raw = AUDIT_JSON.replace("72", "140");
        assert!(matches!(
            parse_audit(&raw),
            Err(SynthesisFailure::Schema(_))
        ));
    }

    #[test]
    fn rejects_missing_json() {
        assert!(matches!(
            parse_audit("sorry, I cannot help with that"),
            Err(SynthesisFailure::MissingJson)
        ));
    }

    #[test]
    fn rejects_empty_use_cases() {
        let raw = r#"{"readinessScore": 50, "analysis": "ok", "useCases": []}"#;
        assert!(matches!(parse_audit(raw), Err(SynthesisFailure::Schema(_))));
    }

    #[test]
    fn rejects_malformed_payload() {
        let raw = r#"{"readinessScore": "high"}"#;
        assert!(matches!(
            parse_audit(raw),
            Err(SynthesisFailure::Malformed(_))
        ));
    }

    #[test]
    fn parses_blueprint_payload() {
        let raw = r#"```json
        {
            "systemPrompt": "You are Nexus, a data sentinel.",
            "logicFlow": ["Watch Slack", "Classify request", "Draft reply"],
            "securityGuardrails": ["Never expose credentials"],
            "estimatedROI": "Saves 10 hours per week"
        }
        ```"#;
        let bp = parse_blueprint(raw).unwrap();
        assert_eq!(bp.logic_flow.len(), 3);
        assert_eq!(bp.origin, Origin::Real);
    }

    #[test]
    fn blueprint_requires_guardrails() {
        let raw = r#"{"systemPrompt": "x", "logicFlow": ["a"], "securityGuardrails": [], "estimatedROI": "y"}"#;
        assert!(matches!(
            parse_blueprint(raw),
            Err(SynthesisFailure::Schema(_))
        ));
    }
}
