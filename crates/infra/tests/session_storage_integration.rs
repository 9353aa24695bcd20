//! Integration tests for session persistence through the session store

mod support;

use std::sync::Arc;

use beagle_core::{RefreshTransport, RefreshedToken, SessionPersistence, SessionStore};
use beagle_domain::{ApiError, Session, SessionBackend, StorageConfig};
use beagle_infra::{storage, FileSessionStorage, MemorySessionStorage};
use support::signed_in_session;
use tempfile::TempDir;

struct NoRefresh;

#[async_trait::async_trait]
impl RefreshTransport for NoRefresh {
    async fn exchange(&self, _refresh_token: &str) -> Result<RefreshedToken, ApiError> {
        Err(ApiError::transport("refresh disabled in test"))
    }
}

fn store_over(persistence: Arc<dyn SessionPersistence>) -> SessionStore {
    SessionStore::new(persistence, Arc::new(NoRefresh))
}

#[tokio::test]
async fn test_file_session_round_trips_between_stores() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.json");

    let store = store_over(Arc::new(FileSessionStorage::new(&path)));
    store.set(Some(signed_in_session())).await;
    store.flush().await;

    let reopened = store_over(Arc::new(FileSessionStorage::new(&path)));
    assert_eq!(reopened.current().await, Some(signed_in_session()));
    assert_eq!(reopened.bearer_token().await.as_deref(), Some("T1"));
}

#[tokio::test]
async fn test_corrupt_file_is_treated_as_logged_out_and_removed() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, b"not json at all").unwrap();

    let store = store_over(Arc::new(FileSessionStorage::new(&path)));

    assert_eq!(store.current().await, None);
    assert!(!store.is_authenticated().await);
    assert!(!path.exists());
}

#[tokio::test]
async fn test_error_session_is_not_written() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.json");

    let store = store_over(Arc::new(FileSessionStorage::new(&path)));
    store.set(Some(Session::failed("Wrong password"))).await;
    store.flush().await;

    assert!(!path.exists());
    assert_eq!(store.current().await, Some(Session::failed("Wrong password")));
    assert!(!store.is_authenticated().await);
}

#[tokio::test]
async fn test_failed_refresh_leaves_session_untouched() {
    let memory = Arc::new(MemorySessionStorage::with_session(signed_in_session()));
    let store = store_over(memory.clone());

    assert!(!store.refresh().await);
    assert_eq!(store.current().await, Some(signed_in_session()));
    assert_eq!(memory.snapshot(), Some(signed_in_session()));
}

#[tokio::test]
async fn test_reset_clears_memory_and_storage() {
    let memory = Arc::new(MemorySessionStorage::with_session(signed_in_session()));
    let store = store_over(memory.clone());
    assert!(store.is_authenticated().await);

    store.reset().await;

    assert_eq!(store.current().await, None);
    assert!(memory.snapshot().is_none());
    assert!(memory.delete_count() >= 1);
}

#[tokio::test]
async fn test_storage_backend_from_config() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested/session.json");
    let config = StorageConfig {
        backend: SessionBackend::File,
        session_path: Some(path.to_string_lossy().into_owned()),
    };

    let persistence = storage::from_config(&config).unwrap();
    persistence.save(&signed_in_session()).await.unwrap();

    assert!(path.exists());
    assert_eq!(persistence.load().await.unwrap(), Some(signed_in_session()));

    let memory = storage::from_config(&StorageConfig {
        backend: SessionBackend::Memory,
        session_path: None,
    })
    .unwrap();
    assert_eq!(memory.load().await.unwrap(), None);
}
