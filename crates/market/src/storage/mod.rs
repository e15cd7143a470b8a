//! Device-local key-value storage.
//!
//! Every piece of marketplace state lives under a string key as a JSON
//! document, the way a browser keeps it in local storage:
//!
//! | key                           | value                  |
//! |-------------------------------|------------------------|
//! | `user`                        | `SessionUser`          |
//! | `favorites`                   | `Vec<ProductSnapshot>` |
//! | `products`                    | `Vec<Listing>`         |
//! | `userProfile_<email>`         | `UserProfile`          |
//! | `chat_<productId>_<sellerId>` | `Vec<ChatMessage>`     |
//!
//! # Implementations
//!
//! - [`MemoryStore`] - process-local map, used by tests
//! - [`FileStore`] - one JSON file per key inside a data directory
//!
//! # Failure semantics
//!
//! Reads never fail from the caller's point of view: a missing key, an I/O
//! error or a document that no longer parses all load as "absent" and are
//! logged at `warn`. Writes propagate their errors.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors that can occur when reading or writing the store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Value could not be serialized.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// A lock guarding the store was poisoned by a panicking writer.
    #[error("storage lock poisoned")]
    Poisoned,
}

/// A string-keyed store of string values.
///
/// Implementations hold exactly one logical writer; concurrent writers to the
/// same key are last-write-wins.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the underlying medium cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the underlying medium cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the underlying medium cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Storage keys.
pub mod keys {
    use campus_market_core::{Email, ProductId, UserId};

    /// Key for the current session record.
    pub const USER: &str = "user";

    /// Key for the favorites collection.
    pub const FAVORITES: &str = "favorites";

    /// Key for user-submitted listings.
    pub const PRODUCTS: &str = "products";

    /// Key for the profile record of `email`.
    #[must_use]
    pub fn profile(email: &Email) -> String {
        format!("userProfile_{email}")
    }

    /// Key for the chat transcript about `product` with `seller`.
    #[must_use]
    pub fn chat(product: ProductId, seller: UserId) -> String {
        format!("chat_{product}_{seller}")
    }
}

/// Load and deserialize the document under `key`.
///
/// Returns `None` when the key is absent, unreadable or malformed.
pub fn load_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!(key, error = %e, "failed to read stored value, treating as empty");
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => {
            tracing::debug!(key, "loaded stored value");
            Some(value)
        }
        Err(e) => {
            tracing::warn!(key, error = %e, "stored value is malformed, treating as empty");
            None
        }
    }
}

/// Load the document under `key`, falling back to `T::default()`.
pub fn load_or_default<T: DeserializeOwned + Default>(store: &dyn KeyValueStore, key: &str) -> T {
    load_json(store, key).unwrap_or_default()
}

/// Serialize `value` and store it under `key`.
///
/// # Errors
///
/// Returns `StorageError` if serialization or the write fails.
pub fn save_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw)?;
    tracing::debug!(key, bytes = raw.len(), "saved value");
    Ok(())
}
