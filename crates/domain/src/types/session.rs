//! Session held by the client between restarts

use serde::{Deserialize, Serialize};

/// The signed-in (or failed sign-in) state of the client.
///
/// A session with `is_error` set or an empty `token` is not authenticated.
/// The identity (`subject_id`) never changes over the life of a session; a
/// token refresh only replaces the tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(rename = "jwt", default)]
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(rename = "user_id", default)]
    pub subject_id: String,
    #[serde(rename = "error", default)]
    pub is_error: bool,
    #[serde(default)]
    pub message: String,
}

impl Session {
    pub fn authenticated(
        token: impl Into<String>,
        refresh_token: Option<String>,
        subject_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            token: token.into(),
            refresh_token,
            subject_id: subject_id.into(),
            is_error: false,
            message: message.into(),
        }
    }

    /// Session recording a failed login or registration.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            token: String::new(),
            refresh_token: None,
            subject_id: String::new(),
            is_error: true,
            message: message.into(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        !self.is_error && !self.token.is_empty()
    }

    pub fn bearer_token(&self) -> Option<&str> {
        self.is_authenticated().then_some(self.token.as_str())
    }

    /// Replace the tokens after a successful refresh.
    ///
    /// The refresh token is only replaced when the server reissued one.
    pub fn apply_refresh(&mut self, token: String, refresh_token: Option<String>) {
        self.token = token;
        if let Some(refresh_token) = refresh_token.filter(|t| !t.is_empty()) {
            self.refresh_token = Some(refresh_token);
        }
    }
}
