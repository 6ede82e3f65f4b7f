//! Step sequencing and per-step validation for an ordered wizard flow.
//!
//! The engine is UI-agnostic: every successful mutation bumps a revision
//! counter and navigation returns an outcome value, which is the host's
//! signal to re-render. It never renders anything itself.

use std::collections::HashMap;

use thiserror::Error;

use crate::AnswerValue;

/// Per-step required-answer predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum Requirement {
    /// Profile answer with non-empty name and email.
    Profile,
    /// Non-empty free text.
    FreeText,
    /// Exactly one token drawn from the catalog.
    OneOf(Vec<String>),
    /// At least one token, all drawn from the catalog.
    AnyOf(Vec<String>),
}

impl Requirement {
    pub fn satisfied_by(&self, answer: Option<&AnswerValue>) -> bool {
        match (self, answer) {
            (Requirement::Profile, Some(AnswerValue::Profile(p))) => {
                !p.name.trim().is_empty() && !p.email.trim().is_empty()
            }
            (Requirement::FreeText, Some(AnswerValue::Text(s))) => !s.trim().is_empty(),
            (Requirement::OneOf(options), Some(AnswerValue::Choice(c))) => {
                options.iter().any(|o| o == c)
            }
            (Requirement::AnyOf(options), Some(AnswerValue::Multi(picked))) => {
                !picked.is_empty() && picked.iter().all(|p| options.iter().any(|o| o == p))
            }
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StepDef {
    pub id: String,
    pub title: String,
    pub requirement: Requirement,
}

impl StepDef {
    pub fn new(id: &str, title: &str, requirement: Requirement) -> Self {
        StepDef {
            id: id.to_string(),
            title: title.to_string(),
            requirement,
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationError {
    #[error("step `{0}` needs an answer before continuing")]
    MissingAnswer(String),
    #[error("answer for step `{0}` does not satisfy the step requirement")]
    Unsatisfied(String),
}

/// What a successful `advance` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// Moved forward to the step at this index.
    Moved(usize),
    /// Already on the terminal step with its requirement met; the host
    /// should trigger submission instead of navigating.
    Submit,
}

/// Ephemeral client-side wizard state. Never written to durable storage;
/// discarded once a result is produced or the user navigates away.
#[derive(Debug, Clone)]
pub struct WizardSession {
    steps: Vec<StepDef>,
    current: usize,
    answers: HashMap<String, AnswerValue>,
    revision: u64,
}

impl WizardSession {
    /// Start a session at step 0. Fails on an empty step list.
    pub fn start(
        steps: Vec<StepDef>,
        initial_answers: HashMap<String, AnswerValue>,
    ) -> Result<Self, String> {
        if steps.is_empty() {
            return Err("wizard needs at least one step".to_string());
        }
        let answers = initial_answers
            .into_iter()
            .filter(|(id, _)| steps.iter().any(|s| &s.id == id))
            .collect();
        Ok(WizardSession {
            steps,
            current: 0,
            answers,
            revision: 0,
        })
    }

    pub fn steps(&self) -> &[StepDef] {
        &self.steps
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_step(&self) -> &StepDef {
        &self.steps[self.current]
    }

    pub fn answer(&self, step_id: &str) -> Option<&AnswerValue> {
        self.answers.get(step_id)
    }

    /// Bumped on every successful mutation; hosts re-render when it changes.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Record an answer. Unknown step ids are a caller programming error and
    /// are ignored rather than surfaced to the user.
    pub fn set_answer(&mut self, step_id: &str, value: AnswerValue) {
        if !self.steps.iter().any(|s| s.id == step_id) {
            return;
        }
        self.answers.insert(step_id.to_string(), value);
        self.revision += 1;
    }

    /// Add or remove one option from a multi-select answer.
    pub fn toggle(&mut self, step_id: &str, option: &str) {
        let mut picked = match self.answers.get(step_id) {
            Some(AnswerValue::Multi(items)) => items.clone(),
            _ => vec![],
        };
        if let Some(pos) = picked.iter().position(|p| p == option) {
            picked.remove(pos);
        } else {
            picked.push(option.to_string());
        }
        self.set_answer(step_id, AnswerValue::Multi(picked));
    }

    /// Move forward one step, clamped to the terminal step. Fails when the
    /// current step's requirement is unmet, leaving the index unchanged.
    pub fn advance(&mut self) -> Result<AdvanceOutcome, ValidationError> {
        let step = &self.steps[self.current];
        let answer = self.answers.get(&step.id);
        if !step.requirement.satisfied_by(answer) {
            return Err(match answer {
                None => ValidationError::MissingAnswer(step.id.clone()),
                Some(_) => ValidationError::Unsatisfied(step.id.clone()),
            });
        }
        if self.current + 1 >= self.steps.len() {
            return Ok(AdvanceOutcome::Submit);
        }
        self.current += 1;
        self.revision += 1;
        Ok(AdvanceOutcome::Moved(self.current))
    }

    /// Move back one step, clamped to 0. Never fails and never clears
    /// answers, so a revisited step shows what was entered before.
    pub fn retreat(&mut self) -> usize {
        if self.current > 0 {
            self.current -= 1;
            self.revision += 1;
        }
        self.current
    }

    /// Terminal step reached and every step's requirement satisfied.
    pub fn is_complete(&self) -> bool {
        self.current + 1 == self.steps.len() && self.first_unsatisfied().is_none()
    }

    /// First step whose requirement is unmet, if any. Used at submission
    /// time; earlier edits never re-invalidate later steps during navigation.
    pub fn first_unsatisfied(&self) -> Option<&StepDef> {
        self.steps
            .iter()
            .find(|s| !s.requirement.satisfied_by(self.answers.get(&s.id)))
    }
}
