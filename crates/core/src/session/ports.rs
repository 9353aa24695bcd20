//! Port interfaces for session persistence and token refresh
//!
//! These traits define the boundaries between the session store and the
//! infrastructure that saves sessions and talks to the token service.

use async_trait::async_trait;
use beagle_domain::{ApiError, Session, StorageError};

/// Durable storage for the single session record.
#[async_trait]
pub trait SessionPersistence: Send + Sync {
    /// Load the stored session, `None` when nothing is stored
    async fn load(&self) -> Result<Option<Session>, StorageError>;

    /// Replace the stored session
    async fn save(&self, session: &Session) -> Result<(), StorageError>;

    /// Remove the stored session; succeeds when nothing is stored
    async fn delete(&self) -> Result<(), StorageError>;
}

/// Tokens issued in exchange for a refresh token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshedToken {
    pub token: String,
    /// Present only when the service rotated the refresh token.
    pub refresh_token: Option<String>,
}

/// Exchanges a refresh token for a new session token.
#[async_trait]
pub trait RefreshTransport: Send + Sync {
    async fn exchange(&self, refresh_token: &str) -> Result<RefreshedToken, ApiError>;
}
