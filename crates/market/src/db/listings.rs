//! Submitted listings repository.

use std::sync::Arc;

use campus_market_core::{ProductId, UserId};

use crate::models::Listing;
use crate::storage::{KeyValueStore, StorageError, keys, load_or_default, save_json};

/// Listings created through the sell form, newest last.
pub struct ListingStore {
    store: Arc<dyn KeyValueStore>,
    items: Vec<Listing>,
}

impl ListingStore {
    /// Load the persisted listings, defaulting to none.
    #[must_use]
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let items = load_or_default(store.as_ref(), keys::PRODUCTS);
        Self { store, items }
    }

    /// All listings in submission order.
    #[must_use]
    pub fn all(&self) -> &[Listing] {
        &self.items
    }

    /// Number of listings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether there are no listings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Look up a listing by id.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Listing> {
        self.items.iter().find(|listing| listing.id == id)
    }

    /// Listings posted by `seller`.
    pub fn by_seller(&self, seller: UserId) -> impl Iterator<Item = &Listing> {
        self.items
            .iter()
            .filter(move |listing| listing.seller.id == seller)
    }

    /// Largest id in use, if any.
    #[must_use]
    pub fn max_id(&self) -> Option<ProductId> {
        self.items.iter().map(|listing| listing.id).max()
    }

    /// Append `listing` and persist the collection.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the collection cannot be written; the
    /// listing is not kept in that case.
    pub fn append(&mut self, listing: Listing) -> Result<(), StorageError> {
        self.items.push(listing);
        if let Err(e) = self.persist() {
            self.items.pop();
            return Err(e);
        }
        Ok(())
    }

    /// Remove the listing with `id` and persist the collection.
    ///
    /// Returns the removed listing, or `None` if no listing had that id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the collection cannot be written; the
    /// listing is kept in that case.
    pub fn delete(&mut self, id: ProductId) -> Result<Option<Listing>, StorageError> {
        let Some(pos) = self.items.iter().position(|listing| listing.id == id) else {
            return Ok(None);
        };

        let removed = self.items.remove(pos);
        if let Err(e) = self.persist() {
            self.items.insert(pos, removed);
            return Err(e);
        }
        Ok(Some(removed))
    }

    fn persist(&self) -> Result<(), StorageError> {
        save_json(self.store.as_ref(), keys::PRODUCTS, &self.items)
    }
}
