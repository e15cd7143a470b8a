//! Marketplace state shared across views.

use std::sync::Arc;

use campus_market_core::ProductId;

use crate::backend::MarketBackend;
use crate::config::MarketConfig;
use crate::db::{ChatStore, FavoritesStore, ListingStore, ProfileStore, SessionStore};
use crate::error::Result;
use crate::middleware::{RouteDecision, guard, require_auth};
use crate::models::{Product, ProductSnapshot, SessionUser, UserProfile};
use crate::routes::Route;
use crate::services::admin::AdminService;
use crate::services::auth::AuthService;
use crate::services::browse::{BrowseService, SortOrder, sort_favorites};
use crate::services::chat::ChatService;
use crate::services::listing::ListingService;
use crate::services::notifications::{self, NotificationFeed};
use crate::storage::KeyValueStore;

/// What the profile page shows.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileView {
    pub user: SessionUser,
    /// Stored profile record, if the account was created through sign-up.
    pub profile: Option<UserProfile>,
    pub listings: Vec<Product>,
}

/// The marketplace: configuration, repositories and backend.
///
/// Created once at startup. Every repository loads its slice of device
/// storage here, so later reads are served from memory.
pub struct Marketplace<B> {
    config: MarketConfig,
    store: Arc<dyn KeyValueStore>,
    sessions: SessionStore,
    favorites: FavoritesStore,
    listings: ListingStore,
    profiles: ProfileStore,
    chats: ChatStore,
    backend: B,
}

impl<B: MarketBackend> Marketplace<B> {
    /// Load every repository from `store`.
    ///
    /// # Arguments
    ///
    /// * `config` - Marketplace configuration
    /// * `store` - Device key-value store
    /// * `backend` - Catalog backend
    pub fn open(config: MarketConfig, store: Arc<dyn KeyValueStore>, backend: B) -> Self {
        let sessions = SessionStore::load(Arc::clone(&store));
        let favorites = FavoritesStore::load(Arc::clone(&store));
        let listings = ListingStore::load(Arc::clone(&store));
        let profiles = ProfileStore::new(Arc::clone(&store));
        let chats = ChatStore::new(Arc::clone(&store));

        tracing::debug!(
            session = ?sessions.state(),
            favorites = favorites.count(),
            listings = listings.len(),
            "marketplace loaded"
        );

        Self {
            config,
            store,
            sessions,
            favorites,
            listings,
            profiles,
            chats,
            backend,
        }
    }

    /// Get a reference to the marketplace configuration.
    #[must_use]
    pub const fn config(&self) -> &MarketConfig {
        &self.config
    }

    /// Get a reference to the device store.
    #[must_use]
    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    /// Get a reference to the backend.
    #[must_use]
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// Get a reference to the session repository.
    #[must_use]
    pub const fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Get a reference to the favorites set.
    #[must_use]
    pub const fn favorites(&self) -> &FavoritesStore {
        &self.favorites
    }

    /// Get a reference to the submitted listings.
    #[must_use]
    pub const fn listings(&self) -> &ListingStore {
        &self.listings
    }

    /// Get a reference to the profile repository.
    #[must_use]
    pub const fn profiles(&self) -> &ProfileStore {
        &self.profiles
    }

    /// Signed-in user, if any.
    #[must_use]
    pub const fn current_user(&self) -> Option<&SessionUser> {
        self.sessions.current()
    }

    /// Guard a navigation to `path`.
    #[must_use]
    pub fn navigate(&self, path: &str) -> RouteDecision {
        let route = Route::parse(path);
        let decision = guard(route, self.sessions.state());
        tracing::debug!(path, target = %decision.target(), "navigation");
        decision
    }

    /// Authentication service.
    pub fn auth(&mut self) -> AuthService<'_> {
        AuthService::new(&self.config.auth, &mut self.sessions, &self.profiles)
    }

    /// Listing submission service.
    pub fn sell(&mut self) -> ListingService<'_> {
        ListingService::new(&self.sessions, &mut self.listings)
    }

    /// Browse service.
    #[must_use]
    pub const fn browse(&self) -> BrowseService<'_, B> {
        BrowseService::new(&self.listings, &self.backend)
    }

    /// Chat service.
    #[must_use]
    pub const fn chat(&self) -> ChatService<'_, B> {
        ChatService::new(&self.sessions, &self.listings, &self.chats, &self.backend)
    }

    /// Admin service.
    pub fn admin(&mut self) -> AdminService<'_, B> {
        AdminService::new(&self.sessions, &mut self.listings, &self.backend)
    }

    /// Toggle a product in or out of favorites.
    ///
    /// Returns whether the product is a favorite afterwards.
    ///
    /// # Errors
    ///
    /// Returns `MarketError::Rejected` without a session.
    /// Returns `MarketError::NotFound` for an unknown product.
    pub async fn toggle_favorite(&mut self, id: ProductId) -> Result<bool> {
        require_auth(self.sessions.current())?;

        // Removal works from the snapshot, even if the product is gone.
        if let Some(snapshot) = self.favorites.list().iter().find(|s| s.id == id).cloned() {
            return Ok(self.favorites.toggle_snapshot(snapshot)?);
        }

        let product = self.browse().product(id).await?;
        Ok(self.favorites.toggle(&product)?)
    }

    /// Favorites in the requested order.
    ///
    /// # Errors
    ///
    /// Returns `MarketError::Rejected` without a session.
    pub fn sorted_favorites(&self, order: SortOrder) -> Result<Vec<ProductSnapshot>> {
        require_auth(self.sessions.current())?;
        Ok(sort_favorites(self.favorites.list(), order))
    }

    /// The signed-in user's profile page.
    ///
    /// # Errors
    ///
    /// Returns `MarketError::Rejected` without a session.
    pub fn profile(&self) -> Result<ProfileView> {
        let user = require_auth(self.sessions.current())?.clone();
        Ok(ProfileView {
            profile: self.profiles.get(&user.email),
            listings: self.browse().profile_listings(user.id),
            user,
        })
    }

    /// The signed-in user's notifications.
    ///
    /// # Errors
    ///
    /// Returns `MarketError::Rejected` without a session.
    pub async fn notifications(&self) -> Result<NotificationFeed> {
        notifications::feed(&self.sessions, &self.backend).await
    }
}
