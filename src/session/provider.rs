use super::id::SessionId;
use super::store::SessionStore;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, warn};

/// Key under which the identifier is persisted.
pub const SESSION_STORAGE_KEY: &str = "flexai_session_id";

/// Hands out the conversation identifier.
///
/// With a store, the first call generates and persists an id and every later call returns it.
/// Store failures are logged and degrade to an id that is kept in memory only, so the id
/// still never changes within one provider's lifetime. Without a store ([`Self::ephemeral`])
/// every call generates a fresh id.
pub struct SessionIdentityProvider {
    store: Option<Arc<dyn SessionStore>>,
    current: Mutex<Option<SessionId>>,
}

impl SessionIdentityProvider {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self {
            store: Some(store),
            current: Mutex::new(None),
        }
    }

    /// No durable storage available (e.g. server-side rendering).
    pub fn ephemeral() -> Self {
        Self {
            store: None,
            current: Mutex::new(None),
        }
    }

    pub fn is_durable(&self) -> bool {
        self.store.is_some()
    }

    pub fn get_or_create_session_id(&self) -> SessionId {
        let Some(store) = &self.store else {
            return SessionId::generate();
        };

        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(id) = current.as_ref() {
            return id.clone();
        }

        let id = match store.get(SESSION_STORAGE_KEY) {
            Ok(Some(stored)) if !stored.is_empty() => SessionId::from(stored),
            Ok(_) => {
                let id = SessionId::generate();
                match store.set(SESSION_STORAGE_KEY, id.as_str()) {
                    Ok(()) => debug!(session_id = %id, store = store.name(), "persisted new session id"),
                    Err(e) => warn!(error = %e, store = store.name(), "failed to persist session id"),
                }
                id
            }
            Err(e) => {
                warn!(error = %e, store = store.name(), "session store unreadable; using unpersisted id");
                SessionId::generate()
            }
        };

        *current = Some(id.clone());
        id
    }

    /// Forget the identifier; the next call creates a new one.
    pub fn clear(&self) {
        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        *current = None;
        if let Some(store) = &self.store {
            if let Err(e) = store.remove(SESSION_STORAGE_KEY) {
                warn!(error = %e, store = store.name(), "failed to clear session id");
            }
        }
    }
}
