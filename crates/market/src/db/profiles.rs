//! Per-user profile repository.

use std::sync::Arc;

use campus_market_core::Email;

use crate::models::UserProfile;
use crate::storage::{KeyValueStore, StorageError, keys, load_json, save_json};

/// Profile records keyed by email.
pub struct ProfileStore {
    store: Arc<dyn KeyValueStore>,
}

impl ProfileStore {
    /// Create a profile repository over `store`.
    #[must_use]
    pub const fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Profile for `email`, if one was recorded and still parses.
    #[must_use]
    pub fn get(&self, email: &Email) -> Option<UserProfile> {
        load_json(self.store.as_ref(), &keys::profile(email))
    }

    /// Write `profile` under its email.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be written.
    pub fn save(&self, profile: &UserProfile) -> Result<(), StorageError> {
        save_json(self.store.as_ref(), &keys::profile(&profile.email), profile)
    }
}
