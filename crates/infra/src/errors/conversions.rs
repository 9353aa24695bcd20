//! Conversions from external infrastructure errors into domain errors.
//!
//! Both target types live in `beagle-domain`, so the conversions are
//! expressed as extension traits instead of `From` impls.

use beagle_domain::{ApiError, StorageError};
use keyring::Error as KeyringError;
use reqwest::Error as HttpError;

/// Convert a failure that produced no usable HTTP response.
pub(crate) trait IntoApiError {
    fn into_api_error(self) -> ApiError;
}

/// Convert a failure of a session persistence backend.
pub(crate) trait IntoStorageError {
    fn into_storage_error(self) -> StorageError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → ApiError */
/* -------------------------------------------------------------------------- */

impl IntoApiError for HttpError {
    fn into_api_error(self) -> ApiError {
        if self.is_timeout() {
            return ApiError::transport("HTTP request timed out");
        }

        if self.is_connect() {
            return ApiError::transport("HTTP connection failure");
        }

        if self.is_body() || self.is_decode() {
            return ApiError::transport(format!("failed to read response body: {self}"));
        }

        if self.is_builder() {
            return ApiError::transport(format!("invalid request: {self}"));
        }

        ApiError::transport(self.to_string())
    }
}

/* -------------------------------------------------------------------------- */
/* std::io::Error / serde_json::Error → StorageError */
/* -------------------------------------------------------------------------- */

impl IntoStorageError for std::io::Error {
    fn into_storage_error(self) -> StorageError {
        StorageError::Io(format!("{:?}: {self}", self.kind()))
    }
}

impl IntoStorageError for serde_json::Error {
    fn into_storage_error(self) -> StorageError {
        StorageError::Corrupt(self.to_string())
    }
}

/* -------------------------------------------------------------------------- */
/* keyring::Error → StorageError */
/* -------------------------------------------------------------------------- */

impl IntoStorageError for KeyringError {
    fn into_storage_error(self) -> StorageError {
        use KeyringError::{Ambiguous, BadEncoding, NoEntry, NoStorageAccess, PlatformFailure};

        match self {
            NoEntry => StorageError::Backend("keychain entry not found".into()),
            BadEncoding(_) => {
                StorageError::Corrupt("credential in keychain is not valid UTF-8".into())
            }
            Ambiguous(entries) => StorageError::Backend(format!(
                "multiple keychain entries matched request ({} results)",
                entries.len()
            )),
            PlatformFailure(err) => StorageError::Backend(format!("keychain platform error: {err}")),
            NoStorageAccess(err) => {
                StorageError::Backend(format!("unable to access secure storage: {err}"))
            }
            other => StorageError::Backend(other.to_string()),
        }
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
