pub mod steps;
pub mod wizard;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub use wizard::{AdvanceOutcome, Requirement, StepDef, ValidationError, WizardSession};

// --- Types ---

/// Contact details collected on the profile step (or pre-filled from an
/// existing session).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub company: String,
}

/// A single wizard answer. Select steps store the chosen catalog token,
/// multi-select steps the set of chosen tokens.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum AnswerValue {
    Text(String),
    Choice(String),
    Multi(Vec<String>),
    Profile(UserProfile),
}

impl AnswerValue {
    /// Flatten an answer to display text. Multi-selects join with ", ".
    pub fn display(&self) -> String {
        match self {
            AnswerValue::Text(s) | AnswerValue::Choice(s) => s.clone(),
            AnswerValue::Multi(items) => items.join(", "),
            AnswerValue::Profile(p) => p.name.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnswerEntry {
    pub step: String,
    pub value: AnswerValue,
}

/// Immutable snapshot of a completed wizard, handed to the synthesizer.
/// One request corresponds to exactly one wizard completion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SynthesisRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<UserProfile>,
    pub answers: Vec<AnswerEntry>,
}

impl SynthesisRequest {
    /// Snapshot the session's answers in step order. The profile step is
    /// lifted out of the answer list into the dedicated field.
    pub fn from_session(session: &WizardSession, profile: Option<UserProfile>) -> Self {
        let answers = session
            .steps()
            .iter()
            .filter(|s| !matches!(s.requirement, Requirement::Profile))
            .filter_map(|s| {
                session.answer(&s.id).map(|v| AnswerEntry {
                    step: s.id.clone(),
                    value: v.clone(),
                })
            })
            .collect();
        SynthesisRequest { profile, answers }
    }

    pub fn answer(&self, step: &str) -> Option<&AnswerValue> {
        self.answers.iter().find(|a| a.step == step).map(|a| &a.value)
    }

    /// Display text for a step's answer, with a fallback for unanswered steps.
    pub fn answer_text(&self, step: &str, default: &str) -> String {
        self.answer(step)
            .map(|v| v.display())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| default.to_string())
    }
}

/// Whether a synthesis result came from the external model or was generated
/// locally. Both are presented identically; the tag exists for logging and
/// tests.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Origin {
    Real,
    Fallback,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub title: String,
    pub impact: String,
    pub difficulty: String,
    pub roi: String,
}

/// Result of the readiness-audit wizard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReadinessReport {
    /// 0-100, validated at parse time.
    pub score: f64,
    pub summary: String,
    pub recommendations: Vec<Recommendation>,
    pub origin: Origin,
}

/// Result of the agent-studio wizard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AgentBlueprint {
    pub system_prompt: String,
    pub logic_flow: Vec<String>,
    pub guardrails: Vec<String>,
    pub roi_estimate: String,
    pub origin: Origin,
}

/// Durable record associating a report with the identity that owns it.
/// Append-only; created at most once per report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuditRecord {
    pub id: String,
    pub user_id: String,
    pub request: SynthesisRequest,
    pub report: ReadinessReport,
    pub created_at: DateTime<Utc>,
}

impl AuditRecord {
    pub fn new(user_id: &str, request: SynthesisRequest, report: ReadinessReport) -> Self {
        AuditRecord {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            request,
            report,
            created_at: Utc::now(),
        }
    }
}

// --- Storage ---

/// Resolve the global data directory (~/.clarity/).
pub fn data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".clarity")
}

/// Directory holding one JSON file per persisted audit record.
pub fn records_dir() -> PathBuf {
    data_dir().join("audits")
}

/// Write a record into `dir` as `{id}.json`.
///
/// Uses atomic write (temp file + rename) so a crash mid-write never leaves
/// a half-serialized record behind for `list_records_in` to choke on.
pub fn save_record_in(dir: &Path, record: &AuditRecord) -> Result<(), String> {
    fs::create_dir_all(dir).map_err(|e| e.to_string())?;
    let json = serde_json::to_string_pretty(record).map_err(|e| e.to_string())?;
    let tmp = dir.join(format!(".{}.json.tmp", record.id));
    let path = dir.join(format!("{}.json", record.id));
    fs::write(&tmp, json).map_err(|e| e.to_string())?;
    fs::rename(&tmp, &path).map_err(|e| e.to_string())
}

pub fn save_record(record: &AuditRecord) -> Result<(), String> {
    save_record_in(&records_dir(), record)
}

/// List a user's records from `dir`, newest first. Unreadable or foreign
/// files are skipped rather than failing the whole listing.
pub fn list_records_in(dir: &Path, user_id: &str) -> Result<Vec<AuditRecord>, String> {
    if !dir.exists() {
        return Ok(vec![]);
    }
    let mut records: Vec<AuditRecord> = fs::read_dir(dir)
        .map_err(|e| e.to_string())?
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            if path.extension().map_or(true, |e| e != "json") {
                return None;
            }
            let raw = fs::read_to_string(&path).ok()?;
            serde_json::from_str::<AuditRecord>(&raw).ok()
        })
        .filter(|r| r.user_id == user_id)
        .collect();
    records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(records)
}

pub fn list_records(user_id: &str) -> Result<Vec<AuditRecord>, String> {
    list_records_in(&records_dir(), user_id)
}

// --- AI Settings ---

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AiSettings {
    pub provider: String,
    pub api_key: String,
    pub model: String,
}

fn settings_path() -> PathBuf {
    data_dir().join("settings.json")
}

pub fn read_settings() -> AiSettings {
    let path = settings_path();
    if !path.exists() {
        return AiSettings::default();
    }
    fs::read_to_string(&path)
        .ok()
        .and_then(|s| serde_json::from_str(&s).ok())
        .unwrap_or_default()
}

pub fn write_settings(settings: &AiSettings) -> Result<(), String> {
    let dir = data_dir();
    fs::create_dir_all(&dir).map_err(|e| e.to_string())?;
    let json = serde_json::to_string_pretty(settings).map_err(|e| e.to_string())?;
    fs::write(settings_path(), json).map_err(|e| e.to_string())
}

pub fn ai_configured(settings: &AiSettings) -> bool {
    !settings.provider.is_empty()
        && !settings.model.is_empty()
        && (settings.provider == "ollama" || !settings.api_key.is_empty())
}
