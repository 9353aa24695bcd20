//! Session persistence adapters

pub mod file;
pub mod keychain;
pub mod memory;

use std::sync::Arc;

use beagle_core::SessionPersistence;
use beagle_domain::{Result, SessionBackend, StorageConfig};

pub use file::FileSessionStorage;
pub use keychain::KeychainSessionStorage;
pub use memory::MemorySessionStorage;

/// Build the persistence adapter selected by configuration.
///
/// # Errors
/// Returns `BeagleError::Config` when the file backend has no usable path.
pub fn from_config(config: &StorageConfig) -> Result<Arc<dyn SessionPersistence>> {
    let persistence: Arc<dyn SessionPersistence> = match config.backend {
        SessionBackend::File => {
            let storage = match config.session_path.as_deref() {
                Some(path) => FileSessionStorage::new(path),
                None => FileSessionStorage::in_config_dir()?,
            };
            Arc::new(storage)
        }
        SessionBackend::Keychain => Arc::new(KeychainSessionStorage::default()),
        SessionBackend::Memory => Arc::new(MemorySessionStorage::default()),
    };
    tracing::debug!(backend = %config.backend, "Session persistence selected");
    Ok(persistence)
}
