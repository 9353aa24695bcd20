//! Premium instance assignments

use serde::{Deserialize, Serialize};

use crate::constants::PREMIUM_INSTANCE_ERROR_MESSAGE;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PremiumInstanceStatus {
    #[serde(default)]
    pub premium_instances_count: i32,
    #[serde(default)]
    pub changes_remaining: i32,
    #[serde(default)]
    pub currently_assigned_display_names: Vec<String>,
    #[serde(default)]
    pub available_display_names: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loading_error: Option<String>,
}

impl PremiumInstanceStatus {
    pub fn error_instance(message: impl Into<String>) -> Self {
        Self { loading_error: Some(message.into()), ..Self::default() }
    }

    /// Error value used when the server could not be reached.
    pub fn unavailable() -> Self {
        Self::error_instance(PREMIUM_INSTANCE_ERROR_MESSAGE)
    }

    pub const fn is_error(&self) -> bool {
        self.loading_error.is_some()
    }
}
