//! Process-wide session store with lazy loading and serialized refresh
//!
//! The store is the only owner of the live [`Session`]:
//! - First access loads the persisted record; a broken record is deleted
//! - Writes update the cache immediately and persist in the background
//! - Refreshes hold the state lock for the whole exchange so concurrent
//!   callers never interleave partial updates

use std::sync::Arc;

use beagle_domain::Session;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::ports::{RefreshTransport, SessionPersistence};

#[derive(Debug, Default)]
struct SessionState {
    loaded: bool,
    session: Option<Session>,
}

struct Inner {
    persistence: Arc<dyn SessionPersistence>,
    refresher: Arc<dyn RefreshTransport>,
    state: Mutex<SessionState>,
}

impl Inner {
    async fn ensure_loaded(&self, state: &mut SessionState) {
        if state.loaded {
            return;
        }

        state.session = match self.persistence.load().await {
            Ok(Some(session)) if session.token.is_empty() => {
                warn!("Stored session has no token, discarding it");
                self.delete_persisted().await;
                None
            }
            Ok(Some(session)) => {
                debug!(authenticated = session.is_authenticated(), "Loaded stored session");
                Some(session)
            }
            Ok(None) => None,
            Err(err) => {
                warn!(error = %err, "Failed to load stored session, discarding it");
                self.delete_persisted().await;
                None
            }
        };
        state.loaded = true;
    }

    async fn persist_current(&self) {
        let state = self.state.lock().await;
        if !state.loaded {
            return;
        }

        match state.session.as_ref() {
            Some(session) if session.is_authenticated() => {
                match self.persistence.save(session).await {
                    Ok(()) => debug!("Session persisted"),
                    Err(err) => warn!(error = %err, "Failed to persist session"),
                }
            }
            _ => self.delete_persisted().await,
        }
    }

    async fn delete_persisted(&self) {
        if let Err(err) = self.persistence.delete().await {
            warn!(error = %err, "Failed to delete stored session");
        }
    }
}

/// Owner of the current session.
///
/// Cloning is cheap and every clone shares the same state.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Inner>,
}

impl SessionStore {
    pub fn new(
        persistence: Arc<dyn SessionPersistence>,
        refresher: Arc<dyn RefreshTransport>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                persistence,
                refresher,
                state: Mutex::new(SessionState::default()),
            }),
        }
    }

    /// Current session, loading it from persistence on first access.
    pub async fn current(&self) -> Option<Session> {
        let mut state = self.inner.state.lock().await;
        self.inner.ensure_loaded(&mut state).await;
        state.session.clone()
    }

    /// Token to send as `Authorization: Bearer`, if the session is usable.
    pub async fn bearer_token(&self) -> Option<String> {
        self.current().await.and_then(|session| session.bearer_token().map(str::to_owned))
    }

    pub async fn is_authenticated(&self) -> bool {
        self.current().await.is_some_and(|session| session.is_authenticated())
    }

    /// Replace the session. `None` is the same as [`reset`](Self::reset).
    ///
    /// The new session is visible immediately; persisting it happens on a
    /// background task and failures are only logged.
    pub async fn set(&self, session: Option<Session>) {
        let Some(session) = session else {
            self.reset().await;
            return;
        };

        {
            let mut state = self.inner.state.lock().await;
            state.loaded = true;
            state.session = Some(session);
        }

        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            inner.persist_current().await;
        });
    }

    /// Write the cached session to persistence and wait for it.
    pub async fn flush(&self) {
        self.inner.persist_current().await;
    }

    /// Drop the session from memory and from persistence.
    pub async fn reset(&self) {
        let mut state = self.inner.state.lock().await;
        state.loaded = true;
        state.session = None;
        self.inner.delete_persisted().await;
        info!("Session cleared");
    }

    /// Exchange the refresh token for a new session token.
    ///
    /// Returns `false` without any network call when there is no refresh
    /// token. On failure the cached session is left as it was.
    pub async fn refresh(&self) -> bool {
        self.refresh_inner(None).await
    }

    /// Refresh after the server rejected `rejected_token`.
    ///
    /// When another caller already replaced that token while this one waited
    /// for the lock, the newer token is reused and no exchange is made.
    pub async fn refresh_after_rejection(&self, rejected_token: &str) -> bool {
        self.refresh_inner(Some(rejected_token)).await
    }

    async fn refresh_inner(&self, rejected_token: Option<&str>) -> bool {
        let mut state = self.inner.state.lock().await;
        self.inner.ensure_loaded(&mut state).await;

        if let Some(rejected) = rejected_token {
            let current = state.session.as_ref().and_then(Session::bearer_token);
            if current.is_some_and(|token| token != rejected) {
                debug!("Session token was already refreshed by another request");
                return true;
            }
        }

        let Some(refresh_token) = state
            .session
            .as_ref()
            .and_then(|session| session.refresh_token.clone())
            .filter(|token| !token.is_empty())
        else {
            warn!("Token refresh skipped: no refresh token available");
            return false;
        };

        info!("Session token rejected, attempting refresh");
        let refreshed = match self.inner.refresher.exchange(&refresh_token).await {
            Ok(refreshed) if !refreshed.token.is_empty() => refreshed,
            Ok(_) => {
                warn!("Token refresh returned an empty token");
                return false;
            }
            Err(err) => {
                warn!(error = %err, "Token refresh failed");
                return false;
            }
        };

        let Some(session) = state.session.as_mut() else {
            return false;
        };
        session.apply_refresh(refreshed.token, refreshed.refresh_token);
        if let Err(err) = self.inner.persistence.save(session).await {
            warn!(error = %err, "Failed to persist refreshed session");
        }
        info!("Session token refreshed");
        true
    }
}
