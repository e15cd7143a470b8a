//! Favorites repository.

use std::collections::HashSet;
use std::sync::Arc;

use campus_market_core::ProductId;

use crate::models::{Product, ProductSnapshot};
use crate::storage::{KeyValueStore, StorageError, keys, load_or_default, save_json};

/// The favorites set.
///
/// Holds product snapshots in the order they were added. A product id
/// appears at most once.
pub struct FavoritesStore {
    store: Arc<dyn KeyValueStore>,
    items: Vec<ProductSnapshot>,
}

impl FavoritesStore {
    /// Load the persisted favorites, defaulting to an empty set.
    ///
    /// Duplicate ids in a stored collection are collapsed to their first
    /// occurrence.
    #[must_use]
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let stored: Vec<ProductSnapshot> = load_or_default(store.as_ref(), keys::FAVORITES);

        let mut seen = HashSet::new();
        let items: Vec<_> = stored
            .into_iter()
            .filter(|item| seen.insert(item.id))
            .collect();

        Self { store, items }
    }

    /// Add `product` if it is not a favorite, remove it if it is.
    ///
    /// Returns whether the product is a favorite after the call.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the collection cannot be written; the set is
    /// left as it was before the call.
    pub fn toggle(&mut self, product: &Product) -> Result<bool, StorageError> {
        self.toggle_snapshot(ProductSnapshot::from(product))
    }

    /// Same as [`toggle`](Self::toggle) for an existing snapshot.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the collection cannot be written.
    pub fn toggle_snapshot(&mut self, snapshot: ProductSnapshot) -> Result<bool, StorageError> {
        let previous = self.items.clone();

        let now_favorite = if let Some(pos) = self.position(snapshot.id) {
            self.items.remove(pos);
            false
        } else {
            self.items.push(ProductSnapshot {
                is_favorite: true,
                ..snapshot
            });
            true
        };

        if let Err(e) = self.persist() {
            self.items = previous;
            return Err(e);
        }

        tracing::debug!(count = self.items.len(), now_favorite, "toggled favorite");
        Ok(now_favorite)
    }

    /// Whether `id` is in the set.
    #[must_use]
    pub fn is_favorite(&self, id: ProductId) -> bool {
        self.position(id).is_some()
    }

    /// Number of favorites.
    #[must_use]
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Favorites in the order they were added.
    #[must_use]
    pub fn list(&self) -> &[ProductSnapshot] {
        &self.items
    }

    /// Remove every favorite.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the empty collection cannot be written.
    pub fn clear(&mut self) -> Result<(), StorageError> {
        let previous = std::mem::take(&mut self.items);
        if let Err(e) = self.persist() {
            self.items = previous;
            return Err(e);
        }
        Ok(())
    }

    fn position(&self, id: ProductId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    fn persist(&self) -> Result<(), StorageError> {
        save_json(self.store.as_ref(), keys::FAVORITES, &self.items)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use campus_market_core::{Category, Condition, Price};

    use super::*;
    use crate::storage::MemoryStore;

    fn product(id: i64, title: &str) -> Product {
        Product {
            id: ProductId::new(id),
            title: title.to_string(),
            description: "Barely used".to_string(),
            price: Price::from_whole(45).unwrap(),
            images: vec!["book.jpg".to_string()],
            condition: Condition::Good,
            location: "Library".to_string(),
            category: Category::Books,
            rating: Some(4.7),
            time_ago: None,
            seller: None,
        }
    }

    fn fresh() -> (Arc<dyn KeyValueStore>, FavoritesStore) {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let favorites = FavoritesStore::load(Arc::clone(&store));
        (store, favorites)
    }

    #[test]
    fn test_toggle_in_adds_exactly_one() {
        let (_, mut favorites) = fresh();
        let p = product(2, "Calculus Textbook");

        assert!(!favorites.is_favorite(p.id));
        assert!(favorites.toggle(&p).unwrap());
        assert!(favorites.is_favorite(p.id));
        assert_eq!(favorites.count(), 1);
    }

    #[test]
    fn test_toggle_twice_restores_original_set() {
        let (_, mut favorites) = fresh();
        favorites.toggle(&product(1, "MacBook Pro")).unwrap();
        let before = favorites.list().to_vec();

        let p = product(2, "Calculus Textbook");
        favorites.toggle(&p).unwrap();
        assert!(!favorites.toggle(&p).unwrap());

        assert_eq!(favorites.list(), before.as_slice());
        assert_eq!(favorites.count(), 1);
        assert!(!favorites.is_favorite(p.id));
    }

    #[test]
    fn test_snapshot_is_persisted_and_reloaded() {
        let (store, mut favorites) = fresh();
        favorites.toggle(&product(9, "Acoustic Guitar")).unwrap();

        let reloaded = FavoritesStore::load(store);
        assert_eq!(reloaded.count(), 1);
        let snapshot = &reloaded.list()[0];
        assert_eq!(snapshot.title, "Acoustic Guitar");
        assert_eq!(snapshot.image.as_deref(), Some("book.jpg"));
        assert!(snapshot.is_favorite);
    }

    #[test]
    fn test_malformed_storage_loads_empty() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        store.set(keys::FAVORITES, "[{\"id\": ").unwrap();

        let favorites = FavoritesStore::load(store);
        assert_eq!(favorites.count(), 0);
    }

    #[test]
    fn test_duplicate_ids_collapse_on_load() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let snap = ProductSnapshot::from(&product(3, "Desk Chair"));
        save_json(store.as_ref(), keys::FAVORITES, &[snap.clone(), snap]).unwrap();

        let favorites = FavoritesStore::load(store);
        assert_eq!(favorites.count(), 1);
    }

    #[test]
    fn test_clear() {
        let (store, mut favorites) = fresh();
        favorites.toggle(&product(1, "MacBook Pro")).unwrap();
        favorites.toggle(&product(2, "Calculus Textbook")).unwrap();

        favorites.clear().unwrap();
        assert_eq!(favorites.count(), 0);
        assert_eq!(FavoritesStore::load(store).count(), 0);
    }
}
