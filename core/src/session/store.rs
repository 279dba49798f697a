//! Owner of the authenticated session.
//!
//! In-memory state is the source of truth for subscribers: every mutation
//! updates it and notifies before the durable write completes, so consumers
//! reflect intent immediately. Durable state converges once the write
//! resolves; a failed write is reported to the caller, not retried.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::broadcast;

use super::types::{Session, SessionEvent, SESSION_KEY};
use crate::error::StoreError;
use crate::storage::PersistentStore;

#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<SessionStoreInner>,
}

struct SessionStoreInner {
    current: std::sync::RwLock<Option<Session>>,
    /// True from startup until the initial restore resolves.
    loading: AtomicBool,
    storage: Arc<dyn PersistentStore>,
    event_tx: broadcast::Sender<SessionEvent>,
    /// Serializes persistence writes issued by this store's own methods.
    /// Callers racing each other still interleave, last write wins.
    write_gate: tokio::sync::Mutex<()>,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn PersistentStore>) -> Self {
        let (event_tx, _) = broadcast::channel(64);
        Self {
            inner: Arc::new(SessionStoreInner {
                current: std::sync::RwLock::new(None),
                loading: AtomicBool::new(true),
                storage,
                event_tx,
                write_gate: tokio::sync::Mutex::new(()),
            }),
        }
    }

    /// Restore the session persisted by a previous run. Invoked once at
    /// startup; the loading flag stays true until the storage read resolves,
    /// then drops regardless of outcome. A corrupt record is treated as no
    /// session.
    pub async fn restore(&self) -> Result<Option<Session>, StoreError> {
        let _gate = self.inner.write_gate.lock().await;
        let read = self.inner.storage.get(SESSION_KEY).await;
        self.inner.loading.store(false, Ordering::SeqCst);

        let session = match read {
            Ok(Some(bytes)) => match serde_json::from_slice::<Session>(&bytes) {
                Ok(session) => Some(session),
                Err(e) => {
                    tracing::warn!(target: "fintrack.session", error = %e, "stored session unreadable, treating as absent");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(target: "fintrack.session", error = %e, "session restore failed");
                self.emit(SessionEvent::Restored {
                    session: None,
                    at: Utc::now(),
                });
                return Err(e);
            }
        };

        *self.inner.current.write().expect("session lock poisoned") = session.clone();
        tracing::debug!(target: "fintrack.session", restored = session.is_some(), "session restore resolved");
        self.emit(SessionEvent::Restored {
            session: session.clone(),
            at: Utc::now(),
        });
        Ok(session)
    }

    /// Establish a session. Once this returns Ok, a subsequent `restore()`
    /// observes the same session unless a later mutation intervenes.
    pub async fn sign_in(&self, session: Session) -> Result<(), StoreError> {
        self.update(Some(session)).await
    }

    pub async fn sign_out(&self) -> Result<(), StoreError> {
        self.update(None).await
    }

    /// Generalized set: `None` deletes the persisted record, `Some` replaces
    /// it. Subscribers are notified with the new value before the durable
    /// write; a storage failure leaves the in-memory state in place and is
    /// returned to the caller.
    pub async fn update(&self, next: Option<Session>) -> Result<(), StoreError> {
        if let Some(session) = &next {
            if session.access_token.trim().is_empty() {
                return Err(StoreError::InvalidSession(
                    "access token must be non-empty".to_string(),
                ));
            }
        }

        *self.inner.current.write().expect("session lock poisoned") = next.clone();
        self.emit(SessionEvent::Changed {
            session: next.clone(),
            at: Utc::now(),
        });

        let _gate = self.inner.write_gate.lock().await;
        let result = match &next {
            Some(session) => {
                let bytes = serde_json::to_vec(session)?;
                self.inner.storage.set(SESSION_KEY, &bytes).await
            }
            None => self.inner.storage.delete(SESSION_KEY).await,
        };
        if let Err(e) = &result {
            tracing::warn!(target: "fintrack.session", error = %e, "session persistence failed");
        } else {
            tracing::debug!(target: "fintrack.session", signed_in = next.is_some(), "session persisted");
        }
        result
    }

    pub fn current(&self) -> Option<Session> {
        self.inner
            .current
            .read()
            .expect("session lock poisoned")
            .clone()
    }

    pub fn access_token(&self) -> Option<String> {
        self.inner
            .current
            .read()
            .expect("session lock poisoned")
            .as_ref()
            .map(|s| s.access_token.clone())
    }

    /// True until the startup `restore()` resolves.
    pub fn is_loading(&self) -> bool {
        self.inner.loading.load(Ordering::SeqCst)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.inner.event_tx.subscribe()
    }

    fn emit(&self, event: SessionEvent) {
        // Nobody listening is fine.
        let _ = self.inner.event_tx.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::types::Identity;
    use crate::storage::MemoryStore;
    use pretty_assertions::assert_eq;

    fn session(name: &str, token: &str) -> Session {
        Session::new(
            Identity {
                id: Some("u1".to_string()),
                name: name.to_string(),
                email: format!("{name}@example.com"),
            },
            token,
        )
        .with_refresh_token("refresh-1")
    }

    #[tokio::test]
    async fn sign_in_then_restore_round_trips() {
        let storage = Arc::new(MemoryStore::new());
        let store = SessionStore::new(storage.clone());
        let s = session("ana", "tok-1");

        store.sign_in(s.clone()).await.unwrap();

        // A fresh store over the same storage sees the same session.
        let fresh = SessionStore::new(storage);
        assert!(fresh.is_loading());
        let restored = fresh.restore().await.unwrap();
        assert!(!fresh.is_loading());
        assert_eq!(restored, Some(s.clone()));
        assert_eq!(fresh.current(), Some(s));
    }

    #[tokio::test]
    async fn sign_out_clears_persisted_state() {
        let storage = Arc::new(MemoryStore::new());
        let store = SessionStore::new(storage.clone());
        store.sign_in(session("ana", "tok-1")).await.unwrap();
        store.sign_out().await.unwrap();

        let fresh = SessionStore::new(storage);
        assert_eq!(fresh.restore().await.unwrap(), None);
        assert_eq!(fresh.current(), None);
    }

    #[tokio::test]
    async fn restore_without_persisted_session_resolves_absent() {
        let store = SessionStore::new(Arc::new(MemoryStore::new()));
        assert!(store.is_loading());
        assert_eq!(store.restore().await.unwrap(), None);
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn empty_access_token_is_rejected() {
        let store = SessionStore::new(Arc::new(MemoryStore::new()));
        let err = store.sign_in(session("ana", "  ")).await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidSession(_)));
        assert_eq!(store.current(), None);
    }

    #[tokio::test]
    async fn mutations_notify_subscribers_with_new_value() {
        let store = SessionStore::new(Arc::new(MemoryStore::new()));
        let mut rx = store.subscribe();
        let s = session("ana", "tok-1");

        store.sign_in(s.clone()).await.unwrap();
        match rx.recv().await.unwrap() {
            SessionEvent::Changed { session, .. } => assert_eq!(session, Some(s)),
            other => panic!("unexpected event: {other:?}"),
        }

        store.sign_out().await.unwrap();
        match rx.recv().await.unwrap() {
            SessionEvent::Changed { session, .. } => assert_eq!(session, None),
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn corrupt_record_restores_as_absent() {
        let storage = Arc::new(MemoryStore::new());
        storage.set(SESSION_KEY, b"not json").await.unwrap();
        let store = SessionStore::new(storage);
        assert_eq!(store.restore().await.unwrap(), None);
        assert!(!store.is_loading());
    }
}
