//! In-memory session storage for tests and embedding hosts

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use beagle_core::SessionPersistence;
use beagle_domain::{Session, StorageError};
use parking_lot::Mutex;

#[derive(Debug, Default)]
enum Record {
    #[default]
    Empty,
    Stored(Session),
    Corrupt,
}

/// Keeps the session record in memory.
///
/// `corrupt()` makes the next load fail the way an unreadable file would.
#[derive(Debug, Default)]
pub struct MemorySessionStorage {
    record: Mutex<Record>,
    saves: AtomicUsize,
    deletes: AtomicUsize,
}

impl MemorySessionStorage {
    pub fn with_session(session: Session) -> Self {
        Self { record: Mutex::new(Record::Stored(session)), ..Self::default() }
    }

    pub fn corrupt() -> Self {
        Self { record: Mutex::new(Record::Corrupt), ..Self::default() }
    }

    /// The stored session, if any.
    pub fn snapshot(&self) -> Option<Session> {
        match &*self.record.lock() {
            Record::Stored(session) => Some(session.clone()),
            Record::Empty | Record::Corrupt => None,
        }
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn delete_count(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SessionPersistence for MemorySessionStorage {
    async fn load(&self) -> Result<Option<Session>, StorageError> {
        match &*self.record.lock() {
            Record::Empty => Ok(None),
            Record::Stored(session) => Ok(Some(session.clone())),
            Record::Corrupt => Err(StorageError::Corrupt("stored session is unreadable".into())),
        }
    }

    async fn save(&self, session: &Session) -> Result<(), StorageError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        *self.record.lock() = Record::Stored(session.clone());
        Ok(())
    }

    async fn delete(&self) -> Result<(), StorageError> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        *self.record.lock() = Record::Empty;
        Ok(())
    }
}
