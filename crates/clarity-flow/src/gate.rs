//! Decides when a synthesized report is written to durable storage,
//! accounting for the case where the owning identity does not exist yet.

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

use clarity_core::{save_record_in, records_dir, AuditRecord, ReadinessReport, SynthesisRequest};

use crate::session::{Identity, SessionContext};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// The single operation this app needs from its backing store. Append-only;
/// nothing is ever updated or deleted.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn insert_record(&self, record: &AuditRecord) -> Result<(), StoreError>;
}

/// Store writing one JSON file per record under the Clarity data directory.
pub struct FileRecordStore {
    dir: PathBuf,
}

impl FileRecordStore {
    pub fn new() -> Self {
        FileRecordStore { dir: records_dir() }
    }

    pub fn with_dir(dir: PathBuf) -> Self {
        FileRecordStore { dir }
    }
}

impl Default for FileRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordStore for FileRecordStore {
    async fn insert_record(&self, record: &AuditRecord) -> Result<(), StoreError> {
        save_record_in(&self.dir, record).map_err(StoreError::Unavailable)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    NoSession,
    HasSession,
    Persisted,
}

/// Persists a report exactly once against the correct identity.
///
/// With a session present, the write happens as soon as synthesis completes.
/// Without one, the report is held in memory behind the account-creation
/// step and written once signup succeeds; abandoning the flow before then
/// simply drops the held report. `Persisted` is terminal — re-rendering or
/// navigating back and forth never re-fires the write.
pub struct PersistenceGate {
    state: GateState,
    held: Option<(SynthesisRequest, ReadinessReport)>,
}

impl PersistenceGate {
    pub fn new(session: &SessionContext) -> Self {
        let state = if session.is_signed_in() {
            GateState::HasSession
        } else {
            GateState::NoSession
        };
        PersistenceGate { state, held: None }
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    /// A write failure is logged and swallowed: the user already holds the
    /// report in memory and only loses durability, never the result itself.
    /// The attempt is made once; the gate still reaches `Persisted`.
    async fn persist(
        &mut self,
        user_id: &str,
        store: &dyn RecordStore,
        request: SynthesisRequest,
        report: ReadinessReport,
    ) {
        let record = AuditRecord::new(user_id, request, report);
        if let Err(e) = store.insert_record(&record).await {
            tracing::warn!(error = %e, user_id, "audit record write failed; result stays in session");
        }
        self.state = GateState::Persisted;
    }

    /// Called once synthesis has produced a report. Persists immediately if
    /// a session exists, otherwise holds the report behind the signup gate.
    pub async fn on_synthesis_complete(
        &mut self,
        session: &SessionContext,
        store: &dyn RecordStore,
        request: SynthesisRequest,
        report: ReadinessReport,
    ) -> GateState {
        match self.state {
            GateState::HasSession => {
                // Session existed at construction, so the identity is known.
                let user_id = session
                    .identity()
                    .map(|i| i.id.clone())
                    .unwrap_or_default();
                self.persist(&user_id, store, request, report).await;
            }
            GateState::NoSession => {
                self.held = Some((request, report));
            }
            GateState::Persisted => {
                tracing::debug!("synthesis completion ignored, record already persisted");
            }
        }
        self.state
    }

    /// Called after a deferred signup succeeds. Persists the held report
    /// under the new identity; without a held report it just records that a
    /// session now exists.
    pub async fn on_account_created(
        &mut self,
        identity: &Identity,
        store: &dyn RecordStore,
    ) -> GateState {
        match (self.state, self.held.take()) {
            (GateState::NoSession, Some((request, report))) => {
                self.persist(&identity.id, store, request, report).await;
            }
            (GateState::NoSession, None) => {
                self.state = GateState::HasSession;
            }
            _ => {}
        }
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clarity_core::{AnswerEntry, AnswerValue, Origin, Recommendation, UserProfile};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct MemStore {
        records: Mutex<Vec<AuditRecord>>,
        inserts: AtomicUsize,
        fail: bool,
    }

    impl MemStore {
        fn new() -> Self {
            MemStore {
                records: Mutex::new(vec![]),
                inserts: AtomicUsize::new(0),
                fail: false,
            }
        }

        fn failing() -> Self {
            MemStore {
                fail: true,
                ..Self::new()
            }
        }
    }

    #[async_trait]
    impl RecordStore for MemStore {
        async fn insert_record(&self, record: &AuditRecord) -> Result<(), StoreError> {
            self.inserts.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(StoreError::Unavailable("disk on fire".to_string()));
            }
            self.records.lock().unwrap().push(record.clone());
            Ok(())
        }
    }

    fn request() -> SynthesisRequest {
        SynthesisRequest {
            profile: Some(UserProfile {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                company: String::new(),
            }),
            answers: vec![AnswerEntry {
                step: "industry".to_string(),
                value: AnswerValue::Choice("Legal".to_string()),
            }],
        }
    }

    fn report() -> ReadinessReport {
        ReadinessReport {
            score: 70.0,
            summary: "ok".to_string(),
            recommendations: vec![Recommendation {
                title: "t".to_string(),
                impact: "i".to_string(),
                difficulty: "Low".to_string(),
                roi: "100%".to_string(),
            }],
            origin: Origin::Fallback,
        }
    }

    fn identity() -> Identity {
        Identity {
            id: "user-42".to_string(),
            email: "ada@example.com".to_string(),
        }
    }

    #[tokio::test]
    async fn signed_in_session_persists_immediately_and_once() {
        let session = SessionContext::signed_in(identity());
        let store = MemStore::new();
        let mut gate = PersistenceGate::new(&session);

        let state = gate
            .on_synthesis_complete(&session, &store, request(), report())
            .await;
        assert_eq!(state, GateState::Persisted);
        assert_eq!(store.inserts.load(Ordering::SeqCst), 1);
        assert_eq!(store.records.lock().unwrap()[0].user_id, "user-42");

        // A re-rendered UI firing the hook again must not duplicate.
        gate.on_synthesis_complete(&session, &store, request(), report())
            .await;
        assert_eq!(store.inserts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn anonymous_session_holds_until_signup() {
        let session = SessionContext::anonymous();
        let store = MemStore::new();
        let mut gate = PersistenceGate::new(&session);

        let state = gate
            .on_synthesis_complete(&session, &store, request(), report())
            .await;
        assert_eq!(state, GateState::NoSession);
        assert_eq!(store.inserts.load(Ordering::SeqCst), 0);

        let state = gate.on_account_created(&identity(), &store).await;
        assert_eq!(state, GateState::Persisted);
        assert_eq!(store.inserts.load(Ordering::SeqCst), 1);
        let records = store.records.lock().unwrap();
        assert_eq!(records[0].user_id, "user-42");
        assert_eq!(records[0].report, report());

        drop(records);
        // Signup completing twice (double click) must not re-insert.
        gate.on_account_created(&identity(), &store).await;
        assert_eq!(store.inserts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn store_failure_is_swallowed_and_not_retried() {
        let session = SessionContext::signed_in(identity());
        let store = MemStore::failing();
        let mut gate = PersistenceGate::new(&session);

        let state = gate
            .on_synthesis_complete(&session, &store, request(), report())
            .await;
        // User keeps the in-memory result; the gate is still terminal.
        assert_eq!(state, GateState::Persisted);
        assert_eq!(store.inserts.load(Ordering::SeqCst), 1);

        gate.on_synthesis_complete(&session, &store, request(), report())
            .await;
        assert_eq!(store.inserts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn signup_without_held_report_just_opens_session() {
        let session = SessionContext::anonymous();
        let store = MemStore::new();
        let mut gate = PersistenceGate::new(&session);

        let state = gate.on_account_created(&identity(), &store).await;
        assert_eq!(state, GateState::HasSession);
        assert_eq!(store.inserts.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn file_store_round_trips_records() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileRecordStore::with_dir(dir.path().to_path_buf());
        let record = AuditRecord::new("user-42", request(), report());
        store.insert_record(&record).await.unwrap();

        let listed = clarity_core::list_records_in(dir.path(), "user-42").unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, record.id);
    }
}
