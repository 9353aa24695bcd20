//! Session persisted in the platform credential store
//!
//! The whole session is stored as one JSON secret. `keyring` calls are
//! blocking, so each one runs on the blocking thread pool.

use async_trait::async_trait;
use beagle_core::SessionPersistence;
use beagle_domain::constants::{KEYCHAIN_ACCOUNT, KEYCHAIN_SERVICE};
use beagle_domain::{Session, StorageError};
use keyring::Entry;
use tracing::debug;

use crate::errors::IntoStorageError;

#[derive(Debug, Clone)]
pub struct KeychainSessionStorage {
    service: String,
    account: String,
}

impl Default for KeychainSessionStorage {
    fn default() -> Self {
        Self::new(KEYCHAIN_SERVICE, KEYCHAIN_ACCOUNT)
    }
}

impl KeychainSessionStorage {
    pub fn new(service: impl Into<String>, account: impl Into<String>) -> Self {
        Self { service: service.into(), account: account.into() }
    }

    fn entry(&self) -> Result<Entry, StorageError> {
        Entry::new(&self.service, &self.account).map_err(IntoStorageError::into_storage_error)
    }

    async fn run_blocking<T, F>(&self, op: F) -> Result<T, StorageError>
    where
        T: Send + 'static,
        F: FnOnce(Entry) -> Result<T, StorageError> + Send + 'static,
    {
        let entry = self.entry()?;
        tokio::task::spawn_blocking(move || op(entry))
            .await
            .map_err(|e| StorageError::Backend(format!("keychain task failed: {e}")))?
    }
}

#[async_trait]
impl SessionPersistence for KeychainSessionStorage {
    async fn load(&self) -> Result<Option<Session>, StorageError> {
        debug!(service = %self.service, "Reading session from keychain");
        let secret = self
            .run_blocking(|entry| match entry.get_password() {
                Ok(secret) => Ok(Some(secret)),
                Err(keyring::Error::NoEntry) => Ok(None),
                Err(err) => Err(err.into_storage_error()),
            })
            .await?;

        secret
            .map(|secret| serde_json::from_str(&secret).map_err(IntoStorageError::into_storage_error))
            .transpose()
    }

    async fn save(&self, session: &Session) -> Result<(), StorageError> {
        let secret = serde_json::to_string(session).map_err(IntoStorageError::into_storage_error)?;
        self.run_blocking(move |entry| {
            entry.set_password(&secret).map_err(IntoStorageError::into_storage_error)
        })
        .await?;
        debug!(service = %self.service, "Session stored in keychain");
        Ok(())
    }

    async fn delete(&self) -> Result<(), StorageError> {
        self.run_blocking(|entry| match entry.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(err) => Err(err.into_storage_error()),
        })
        .await?;
        debug!(service = %self.service, "Session removed from keychain");
        Ok(())
    }
}
