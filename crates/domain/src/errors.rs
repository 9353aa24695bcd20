//! Error types used throughout the client

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{
    NETWORK_ERROR_MESSAGE, NOT_AUTHENTICATED_MESSAGE, SESSION_EXPIRED_MESSAGE,
    TRANSPORT_FAILURE_STATUS, UNKNOWN_ERROR_MESSAGE, UNREADABLE_RESPONSE_MESSAGE,
};

/// Failure of a single API call.
///
/// Every variant is terminal for the call that produced it. Only
/// `SessionExpired` has a side effect: the session has already been reset by
/// the time it is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ApiError {
    /// No response was received (connect failure, timeout, broken body).
    #[error("Transport failure: {message}")]
    Transport { message: String },

    /// The request needs a session token and none is available.
    #[error("Not authenticated")]
    Unauthenticated,

    /// The server rejected the token and the refresh did not recover it.
    #[error("Session expired")]
    SessionExpired,

    /// Non-2xx response other than a recoverable 401.
    #[error("Server error {status}: {message}")]
    Server { status: u16, message: String },

    /// The response framing headers or byte counts are inconsistent.
    #[error("Malformed response: {message}")]
    Malformed { message: String },

    /// A 2xx body could not be decoded into the expected type.
    #[error("Failed to decode response: {message}")]
    Decode { message: String },
}

impl ApiError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport { message: message.into() }
    }

    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server { status, message: message.into() }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed { message: message.into() }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode { message: message.into() }
    }

    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Transport { .. } => ErrorKind::Transport,
            Self::Unauthenticated => ErrorKind::Unauthenticated,
            Self::SessionExpired => ErrorKind::SessionExpired,
            Self::Server { .. } => ErrorKind::Server,
            Self::Malformed { .. } => ErrorKind::Malformed,
            Self::Decode { .. } => ErrorKind::Decode,
        }
    }

    /// HTTP status associated with the failure, `-1` when there is none.
    pub fn http_status(&self) -> i32 {
        match self {
            Self::Server { status, .. } => i32::from(*status),
            Self::SessionExpired => 401,
            _ => TRANSPORT_FAILURE_STATUS,
        }
    }

    /// Message suitable for showing to the user.
    ///
    /// Server messages are passed through verbatim; every other kind maps to
    /// a fixed fallback.
    pub fn user_message(&self) -> String {
        match self {
            Self::Server { message, .. } => message.clone(),
            Self::Transport { .. } => NETWORK_ERROR_MESSAGE.to_string(),
            Self::Unauthenticated => NOT_AUTHENTICATED_MESSAGE.to_string(),
            Self::SessionExpired => SESSION_EXPIRED_MESSAGE.to_string(),
            Self::Malformed { .. } | Self::Decode { .. } => {
                UNREADABLE_RESPONSE_MESSAGE.to_string()
            }
        }
    }

    pub fn outcome(&self) -> ErrorOutcome {
        let message = match self {
            Self::Transport { .. } => UNKNOWN_ERROR_MESSAGE.to_string(),
            other => other.user_message(),
        };
        ErrorOutcome { kind: self.kind(), http_status: self.http_status(), message }
    }

    pub const fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Unauthenticated | Self::SessionExpired)
    }
}

/// Coarse classification of an [`ApiError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Transport,
    Unauthenticated,
    SessionExpired,
    Server,
    Malformed,
    Decode,
}

/// Flattened view of a failure as reported to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorOutcome {
    pub kind: ErrorKind,
    pub http_status: i32,
    pub message: String,
}

/// Failure of a session persistence backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(String),

    #[error("Stored session is corrupt: {0}")]
    Corrupt(String),

    #[error("Credential store error: {0}")]
    Backend(String),
}

/// Failure while setting the client up (configuration, logging, wiring).
#[derive(Error, Debug, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum BeagleError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<StorageError> for BeagleError {
    fn from(err: StorageError) -> Self {
        Self::Storage(err.to_string())
    }
}

/// Result type alias for setup operations
pub type Result<T> = std::result::Result<T, BeagleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_outcome_has_no_status_and_generic_message() {
        let outcome = ApiError::transport("connection refused").outcome();
        assert_eq!(outcome.kind, ErrorKind::Transport);
        assert_eq!(outcome.http_status, -1);
        assert_eq!(outcome.message, "Unknown Error");
    }

    #[test]
    fn server_message_is_shown_verbatim() {
        let err = ApiError::server(400, "Item is blocked");
        assert_eq!(err.user_message(), "Item is blocked");
        assert_eq!(err.http_status(), 400);
        assert_eq!(err.outcome().kind, ErrorKind::Server);
    }

    #[test]
    fn session_expired_carries_login_prompt() {
        let outcome = ApiError::SessionExpired.outcome();
        assert_eq!(outcome.http_status, 401);
        assert_eq!(outcome.message, "Session expired. Please log in again.");
        assert!(ApiError::SessionExpired.is_auth_failure());
    }

    #[test]
    fn decode_failures_use_fallback_message() {
        let err = ApiError::decode("missing field `type`");
        assert_eq!(err.user_message(), UNREADABLE_RESPONSE_MESSAGE);
        assert_eq!(err.http_status(), -1);
        assert!(!err.is_auth_failure());
    }
}
