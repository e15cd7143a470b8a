//! Session record repository.

use std::sync::Arc;

use crate::models::{SessionState, SessionUser};
use crate::storage::{KeyValueStore, StorageError, keys, load_json, save_json};

/// Holds the current session record and mirrors it to storage.
pub struct SessionStore {
    store: Arc<dyn KeyValueStore>,
    current: Option<SessionUser>,
}

impl SessionStore {
    /// Load the persisted session, if any.
    ///
    /// A record whose `isAuthenticated` flag is false is ignored.
    #[must_use]
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let current = load_json::<SessionUser>(store.as_ref(), keys::USER)
            .filter(|user| user.is_authenticated);
        Self { store, current }
    }

    /// The signed-in user, if any.
    #[must_use]
    pub const fn current(&self) -> Option<&SessionUser> {
        self.current.as_ref()
    }

    /// Current state of the session machine.
    #[must_use]
    pub fn state(&self) -> SessionState {
        SessionState::of(self.current.as_ref())
    }

    /// Persist `user` as the current session.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be written; the in-memory
    /// session is left unchanged in that case.
    pub fn save(&mut self, user: SessionUser) -> Result<(), StorageError> {
        save_json(self.store.as_ref(), keys::USER, &user)?;
        self.current = Some(user);
        Ok(())
    }

    /// Drop the current session and remove the persisted record.
    ///
    /// The in-memory session is cleared even if the removal fails.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the persisted record cannot be removed.
    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.current = None;
        self.store.remove(keys::USER)
    }
}
