use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use clarity_core::UserProfile;

/// Minimum password length accepted at signup, checked locally before the
/// provider is called.
pub const MIN_PASSWORD_LEN: usize = 6;

/// A signed-in identity as seen by this app: a stable key for persistence
/// plus the email shown in the UI.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub id: String,
    pub email: String,
}

/// Whether a user session exists, passed explicitly into each flow at
/// construction instead of read from ambient global state.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    identity: Option<Identity>,
}

impl SessionContext {
    pub fn anonymous() -> Self {
        SessionContext { identity: None }
    }

    pub fn signed_in(identity: Identity) -> Self {
        SessionContext {
            identity: Some(identity),
        }
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.identity.is_some()
    }
}

/// Surfaced to the user as a message on the signup form; never fatal.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("this email is already registered, please log in instead")]
    AlreadyRegistered,
    #[error("password must be at least 6 characters")]
    WeakPassword,
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("auth provider error: {0}")]
    Provider(String),
}

/// The slice of the hosted identity service this app consumes.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        profile: &UserProfile,
    ) -> Result<Identity, AuthError>;
}
