//! Result of splitting a multiplexed response body

use serde::{Deserialize, Serialize};

use crate::constants::{
    SECONDARY_LOAD_FAILED_MESSAGE, SECONDARY_NOT_AVAILABLE_MESSAGE, SECONDARY_UNSUPPORTED_MESSAGE,
};
use crate::types::envelope::FramedPayload;

/// Why a secondary sub-message is missing without anything having gone wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbsentReason {
    /// The server sent zero secondary bytes.
    NotAvailable,
    /// The response used a format that cannot carry a secondary part.
    UnsupportedFormat,
}

/// Outcome of decoding the optional secondary sub-message.
///
/// Secondary failures never fail the request; they are reported here next to
/// the successfully decoded primary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SecondaryPayload<S> {
    Present {
        data: S,
        /// The primary was a no-op ("wait") message.
        from_noop_primary: bool,
    },
    Absent {
        reason: AbsentReason,
        message: String,
    },
    Failed {
        message: String,
    },
}

impl<S> SecondaryPayload<S> {
    pub const fn present(data: S, from_noop_primary: bool) -> Self {
        Self::Present { data, from_noop_primary }
    }

    pub fn not_available() -> Self {
        Self::Absent {
            reason: AbsentReason::NotAvailable,
            message: SECONDARY_NOT_AVAILABLE_MESSAGE.to_string(),
        }
    }

    pub fn unsupported_format() -> Self {
        Self::Absent {
            reason: AbsentReason::UnsupportedFormat,
            message: SECONDARY_UNSUPPORTED_MESSAGE.to_string(),
        }
    }

    pub fn failed() -> Self {
        Self::Failed { message: SECONDARY_LOAD_FAILED_MESSAGE.to_string() }
    }

    pub const fn data(&self) -> Option<&S> {
        match self {
            Self::Present { data, .. } => Some(data),
            _ => None,
        }
    }

    pub fn into_data(self) -> Option<S> {
        match self {
            Self::Present { data, .. } => Some(data),
            _ => None,
        }
    }

    /// Message to display in place of the secondary data, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Present { .. } => None,
            Self::Absent { message, .. } | Self::Failed { message } => Some(message),
        }
    }

    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    pub const fn absent_reason(&self) -> Option<AbsentReason> {
        match self {
            Self::Absent { reason, .. } => Some(*reason),
            _ => None,
        }
    }

    pub const fn from_noop_primary(&self) -> bool {
        matches!(self, Self::Present { from_noop_primary: true, .. })
    }
}

/// A primary message together with its optional secondary part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiplexedResponse<P, S> {
    pub primary: P,
    pub secondary: SecondaryPayload<S>,
    /// Framing metadata, `None` for single-object JSON responses.
    #[serde(skip)]
    pub frame: Option<FramedPayload>,
}
