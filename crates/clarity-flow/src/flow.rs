//! End-to-end orchestration: wizard answers in, synthesized result out,
//! persisted through the gate.

use std::sync::Arc;

use clarity_core::{
    steps, AdvanceOutcome, AgentBlueprint, AnswerValue, ReadinessReport, SynthesisRequest,
    UserProfile, ValidationError, WizardSession,
};
use clarity_synth::{synthesize_audit, synthesize_blueprint, CompletionClient};

use crate::gate::{PersistenceGate, RecordStore};
use crate::session::{AuthError, AuthProvider, SessionContext, MIN_PASSWORD_LEN};

/// User-visible phase of the readiness flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Collecting,
    /// Report produced but no session exists; account creation unlocks it.
    SignupGate,
    Dashboard,
}

/// The readiness-audit flow: collects answers, synthesizes once, and routes
/// the result through the persistence gate.
pub struct AssessmentFlow {
    session: SessionContext,
    wizard: WizardSession,
    client: Arc<dyn CompletionClient>,
    auth: Arc<dyn AuthProvider>,
    store: Arc<dyn RecordStore>,
    gate: PersistenceGate,
    request: Option<SynthesisRequest>,
    report: Option<ReadinessReport>,
    synthesizing: bool,
    phase: Phase,
}

impl AssessmentFlow {
    pub fn new(
        session: SessionContext,
        client: Arc<dyn CompletionClient>,
        auth: Arc<dyn AuthProvider>,
        store: Arc<dyn RecordStore>,
    ) -> Self {
        let mut wizard = WizardSession::start(steps::readiness_steps(), Default::default())
            .expect("readiness step catalog is non-empty");

        // A signed-in visitor skips profile creation; the profile is
        // pre-filled from the session.
        if let Some(identity) = session.identity() {
            wizard.set_answer(
                "profile",
                AnswerValue::Profile(UserProfile {
                    name: "Member".to_string(),
                    email: identity.email.clone(),
                    company: "My Company".to_string(),
                }),
            );
            let _ = wizard.advance();
        }

        let gate = PersistenceGate::new(&session);
        AssessmentFlow {
            session,
            wizard,
            client,
            auth,
            store,
            gate,
            request: None,
            report: None,
            synthesizing: false,
            phase: Phase::Collecting,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn wizard(&self) -> &WizardSession {
        &self.wizard
    }

    pub fn report(&self) -> Option<&ReadinessReport> {
        self.report.as_ref()
    }

    /// The inputs the displayed report was synthesized from.
    pub fn request(&self) -> Option<&SynthesisRequest> {
        self.request.as_ref()
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn set_answer(&mut self, step_id: &str, value: AnswerValue) {
        self.wizard.set_answer(step_id, value);
    }

    pub fn toggle(&mut self, step_id: &str, option: &str) {
        self.wizard.toggle(step_id, option);
    }

    pub fn retreat(&mut self) -> usize {
        self.wizard.retreat()
    }

    /// Move the wizard forward; on the terminal step this submits and runs
    /// synthesis exactly once. While a synthesis is in flight, or once a
    /// report exists, further calls are ignored and return the current
    /// phase — the UI-level idempotency guard.
    pub async fn advance(&mut self) -> Result<Phase, ValidationError> {
        if self.phase != Phase::Collecting || self.synthesizing {
            return Ok(self.phase);
        }
        match self.wizard.advance()? {
            AdvanceOutcome::Moved(_) => Ok(Phase::Collecting),
            AdvanceOutcome::Submit => Ok(self.submit().await),
        }
    }

    async fn submit(&mut self) -> Phase {
        if self.report.is_some() {
            return self.phase;
        }
        self.synthesizing = true;

        let profile = match self.wizard.answer("profile") {
            Some(AnswerValue::Profile(p)) => Some(p.clone()),
            _ => None,
        };
        let request = SynthesisRequest::from_session(&self.wizard, profile);
        tracing::debug!("audit wizard submitted, starting synthesis");
        let report = synthesize_audit(&*self.client, &request).await;

        self.synthesizing = false;
        self.gate
            .on_synthesis_complete(&self.session, &*self.store, request.clone(), report.clone())
            .await;
        self.request = Some(request);
        self.report = Some(report);
        self.phase = if self.session.is_signed_in() {
            Phase::Dashboard
        } else {
            Phase::SignupGate
        };
        self.phase
    }

    /// Create the deferred account and persist the held report under the new
    /// identity. On failure the user stays on the signup gate to retry.
    pub async fn complete_signup(&mut self, password: &str) -> Result<Phase, AuthError> {
        if self.phase != Phase::SignupGate {
            return Ok(self.phase);
        }
        if password.len() < MIN_PASSWORD_LEN {
            return Err(AuthError::WeakPassword);
        }
        let profile = match self.wizard.answer("profile") {
            Some(AnswerValue::Profile(p)) => p.clone(),
            _ => UserProfile::default(),
        };

        let identity = self.auth.sign_up(&profile.email, password, &profile).await?;
        self.session = SessionContext::signed_in(identity.clone());
        self.gate.on_account_created(&identity, &*self.store).await;
        self.phase = Phase::Dashboard;
        Ok(self.phase)
    }
}

/// User-visible phase of the agent-studio flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentPhase {
    Collecting,
    Blueprint,
}

/// The agent-studio flow: same engine, different step catalog and result
/// schema, and no persistence gate — blueprints live only in the session.
pub struct AgentStudioFlow {
    wizard: WizardSession,
    client: Arc<dyn CompletionClient>,
    blueprint: Option<AgentBlueprint>,
    synthesizing: bool,
}

impl AgentStudioFlow {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        let wizard = WizardSession::start(steps::agent_steps(), Default::default())
            .expect("agent step catalog is non-empty");
        AgentStudioFlow {
            wizard,
            client,
            blueprint: None,
            synthesizing: false,
        }
    }

    pub fn phase(&self) -> AgentPhase {
        if self.blueprint.is_some() {
            AgentPhase::Blueprint
        } else {
            AgentPhase::Collecting
        }
    }

    pub fn wizard(&self) -> &WizardSession {
        &self.wizard
    }

    pub fn blueprint(&self) -> Option<&AgentBlueprint> {
        self.blueprint.as_ref()
    }

    pub fn set_answer(&mut self, step_id: &str, value: AnswerValue) {
        self.wizard.set_answer(step_id, value);
    }

    pub fn toggle(&mut self, step_id: &str, option: &str) {
        self.wizard.toggle(step_id, option);
    }

    pub fn retreat(&mut self) -> usize {
        self.wizard.retreat()
    }

    pub async fn advance(&mut self) -> Result<AgentPhase, ValidationError> {
        if self.blueprint.is_some() || self.synthesizing {
            return Ok(self.phase());
        }
        match self.wizard.advance()? {
            AdvanceOutcome::Moved(_) => Ok(AgentPhase::Collecting),
            AdvanceOutcome::Submit => {
                self.synthesizing = true;
                let request = SynthesisRequest::from_session(&self.wizard, None);
                let blueprint = synthesize_blueprint(&*self.client, &request).await;
                self.synthesizing = false;
                self.blueprint = Some(blueprint);
                Ok(AgentPhase::Blueprint)
            }
        }
    }

    /// Start a fresh architecture, discarding the current blueprint.
    pub fn restart(&mut self) {
        self.wizard = WizardSession::start(steps::agent_steps(), Default::default())
            .expect("agent step catalog is non-empty");
        self.blueprint = None;
    }
}
