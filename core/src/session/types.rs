use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Storage key holding the serialized session record.
pub const SESSION_KEY: &str = "session";

/// The authenticated user's profile as returned by `/auth/me`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub email: String,
}

/// The authenticated session: identity plus tokens. Either absent or fully
/// populated; a non-empty access token is enforced at the store boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub identity: Identity,
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

impl Session {
    pub fn new(identity: Identity, access_token: impl Into<String>) -> Self {
        Self {
            identity,
            access_token: access_token.into(),
            refresh_token: None,
        }
    }

    pub fn with_refresh_token(mut self, token: impl Into<String>) -> Self {
        self.refresh_token = Some(token.into());
        self
    }
}

/// Session state change, broadcast to subscribers on every mutation.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// Startup restore resolved, with whatever was (or was not) on disk.
    Restored {
        session: Option<Session>,
        at: DateTime<Utc>,
    },
    /// Explicit mutation: `Some` after sign-in/update, `None` after sign-out.
    Changed {
        session: Option<Session>,
        at: DateTime<Utc>,
    },
}
