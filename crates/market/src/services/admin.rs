//! Admin dashboard operations.

use tracing::instrument;

use campus_market_core::ProductId;

use crate::backend::MarketBackend;
use crate::db::{ListingStore, SessionStore};
use crate::error::{MarketError, Result};
use crate::middleware::require_admin;
use crate::models::{Activity, Listing};

/// Dashboard summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardStats {
    pub total_listings: usize,
    pub active_listings: usize,
    pub recent_activity: Vec<Activity>,
}

/// Admin service. Every operation requires an admin session.
pub struct AdminService<'a, B> {
    sessions: &'a SessionStore,
    listings: &'a mut ListingStore,
    backend: &'a B,
}

impl<'a, B: MarketBackend> AdminService<'a, B> {
    /// Create a new admin service.
    pub const fn new(
        sessions: &'a SessionStore,
        listings: &'a mut ListingStore,
        backend: &'a B,
    ) -> Self {
        Self {
            sessions,
            listings,
            backend,
        }
    }

    /// Listing counts and the recent activity feed.
    ///
    /// # Errors
    ///
    /// Returns `MarketError::Rejected` unless an admin is signed in.
    #[instrument(skip(self))]
    pub async fn stats(&self) -> Result<DashboardStats> {
        require_admin(self.sessions.current())?;

        let recent_activity = self.backend.recent_activity().await?;
        Ok(DashboardStats {
            total_listings: self.listings.len(),
            active_listings: self.listings.len(),
            recent_activity,
        })
    }

    /// Submitted listings, for moderation.
    ///
    /// # Errors
    ///
    /// Returns `MarketError::Rejected` unless an admin is signed in.
    pub fn listings(&self) -> Result<&[Listing]> {
        require_admin(self.sessions.current())?;
        Ok(self.listings.all())
    }

    /// Remove a submitted listing.
    ///
    /// # Errors
    ///
    /// Returns `MarketError::Rejected` unless an admin is signed in.
    /// Returns `MarketError::NotFound` for an unknown id.
    #[instrument(skip(self))]
    pub fn delete_listing(&mut self, id: ProductId) -> Result<Listing> {
        let admin = require_admin(self.sessions.current())?;

        let removed = self
            .listings
            .delete(id)?
            .ok_or_else(|| MarketError::NotFound(format!("Listing {id}")))?;

        tracing::info!(listing_id = %id, admin_id = %admin.id, "listing deleted");
        Ok(removed)
    }
}
