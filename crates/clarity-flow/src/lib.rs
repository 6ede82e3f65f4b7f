pub mod flow;
pub mod gate;
pub mod loading;
pub mod session;

pub use flow::{AgentPhase, AgentStudioFlow, AssessmentFlow, Phase};
pub use gate::{FileRecordStore, GateState, PersistenceGate, RecordStore, StoreError};
pub use loading::StatusRotation;
pub use session::{AuthError, AuthProvider, Identity, SessionContext, MIN_PASSWORD_LEN};
