use thiserror::Error;

/// Errors surfaced by the API client and the resource hooks built on it.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Client-side validation failure. Never reaches the network layer.
    #[error("validation failed: {0}")]
    Validation(String),
    /// 401/403 from the backend. Also triggers the logout side channel.
    #[error("session expired (status {status})")]
    AuthExpired { status: u16 },
    /// Any other non-2xx response. Message comes from the response body's
    /// `error` field when present.
    #[error("request failed with status {status}: {message}")]
    Request { status: u16, message: String },
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ApiError {
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, ApiError::AuthExpired { .. })
    }

    /// Human-readable message for inline display, falling back to the
    /// supplied default when the error carries nothing usable.
    pub fn display_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Validation(msg) => msg.clone(),
            ApiError::Request { message, .. } if !message.is_empty() => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

/// Errors from the persistence layer backing the session store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("invalid session: {0}")]
    InvalidSession(String),
}
