//! Step catalogs for the two shipped wizards.

use crate::wizard::{Requirement, StepDef};

pub const INDUSTRIES: &[&str] = &[
    "Manufacturing",
    "Services",
    "Retail",
    "Healthcare",
    "Legal",
    "Construction",
];

pub const COMPANY_SIZES: &[&str] = &[
    "1-10 (Micro)",
    "11-50 (Small)",
    "51-200 (Medium)",
    "200+ (Large)",
];

pub const DATA_SOURCES: &[&str] = &["Spreadsheets/Paper", "SaaS Cloud Apps", "Central Database"];

pub const GOALS: &[&str] = &["Time Savings", "Revenue Growth", "Cost Reduction"];

pub const MATURITY_LEVELS: &[&str] = &["Low", "Medium", "High"];

pub const AGENT_ROLES: &[&str] = &[
    "Executive Orchestrator",
    "Data Sentinel",
    "Task Specialist",
    "Client Concierge",
];

pub const CAPABILITIES: &[&str] = &[
    "Web Research",
    "Document Analysis",
    "Code Execution",
    "Image Generation",
    "Database Querying",
    "API Orchestration",
    "Multi-Step Reasoning",
];

pub const INTEGRATIONS: &[&str] = &[
    "Slack",
    "Microsoft Teams",
    "Salesforce",
    "Zendesk",
    "Email (SMTP)",
    "Custom Webhooks",
    "SQL/NoSQL DB",
];

fn one_of(options: &[&str]) -> Requirement {
    Requirement::OneOf(options.iter().map(|s| s.to_string()).collect())
}

fn any_of(options: &[&str]) -> Requirement {
    Requirement::AnyOf(options.iter().map(|s| s.to_string()).collect())
}

/// Readiness-audit flow: profile, then six assessment questions ending in
/// the free-text bottleneck. Terminal advance triggers synthesis.
pub fn readiness_steps() -> Vec<StepDef> {
    vec![
        StepDef::new("profile", "Create Profile", Requirement::Profile),
        StepDef::new("industry", "What is your industry?", one_of(INDUSTRIES)),
        StepDef::new("size", "Employee Count?", one_of(COMPANY_SIZES)),
        StepDef::new("data-source", "Where does your data live?", one_of(DATA_SOURCES)),
        StepDef::new("goal", "What is your #1 Goal?", one_of(GOALS)),
        StepDef::new("maturity", "Who handles IT?", one_of(MATURITY_LEVELS)),
        StepDef::new(
            "pain-point",
            "Describe your biggest bottleneck",
            Requirement::FreeText,
        ),
    ]
}

/// Agent-studio flow: identity and role, then tool selection, ending in the
/// free-text objective.
pub fn agent_steps() -> Vec<StepDef> {
    vec![
        StepDef::new("name", "Agent Identifier", Requirement::FreeText),
        StepDef::new("role", "Define the Agent's Identity", one_of(AGENT_ROLES)),
        StepDef::new("capabilities", "Assign Capabilities", any_of(CAPABILITIES)),
        StepDef::new("integrations", "Establish Integrations", any_of(INTEGRATIONS)),
        StepDef::new("objective", "Primary Objective", Requirement::FreeText),
    ]
}
