//! Session persisted as a single JSON file
//!
//! The default location is `<config dir>/beagle/session.json`. Writes go to a
//! sibling temp file first and are renamed into place, so a crash mid-write
//! never leaves a half-written session behind.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use beagle_core::SessionPersistence;
use beagle_domain::constants::{APP_DIR_NAME, SESSION_FILE_NAME};
use beagle_domain::{BeagleError, Session, StorageError};
use tracing::debug;

use crate::errors::IntoStorageError;

#[derive(Debug, Clone)]
pub struct FileSessionStorage {
    path: PathBuf,
}

impl FileSessionStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Storage under the platform config directory.
    ///
    /// # Errors
    /// Returns `BeagleError::Config` when the platform has no config directory.
    pub fn in_config_dir() -> Result<Self, BeagleError> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            BeagleError::Config("Cannot determine the platform config directory".to_string())
        })?;
        Ok(Self::new(config_dir.join(APP_DIR_NAME).join(SESSION_FILE_NAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl SessionPersistence for FileSessionStorage {
    async fn load(&self) -> Result<Option<Session>, StorageError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into_storage_error()),
        };

        let session = serde_json::from_slice(&bytes).map_err(IntoStorageError::into_storage_error)?;
        debug!(path = %self.path.display(), "Session file loaded");
        Ok(Some(session))
    }

    async fn save(&self, session: &Session) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(IntoStorageError::into_storage_error)?;
        }

        let contents =
            serde_json::to_vec_pretty(session).map_err(IntoStorageError::into_storage_error)?;
        let temp = self.temp_path();
        tokio::fs::write(&temp, contents).await.map_err(IntoStorageError::into_storage_error)?;
        tokio::fs::rename(&temp, &self.path).await.map_err(IntoStorageError::into_storage_error)?;

        debug!(path = %self.path.display(), "Session file written");
        Ok(())
    }

    async fn delete(&self) -> Result<(), StorageError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                debug!(path = %self.path.display(), "Session file removed");
                Ok(())
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into_storage_error()),
        }
    }
}
