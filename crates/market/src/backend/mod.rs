//! Marketplace backend.
//!
//! # Architecture
//!
//! - The catalog, seller profiles, notifications and the admin activity feed
//!   come from a backend, never from device storage
//! - Every call is `async`; the bundled [`MockBackend`] serves seeded data
//!   after a configurable delay that stands in for network latency
//! - Sellers answer chat messages through [`MarketBackend::seller_reply`]
//!
//! # Example
//!
//! ```rust,ignore
//! use campus_market::backend::{MarketBackend, MockBackend};
//!
//! let backend = MockBackend::new(config.backend.clone());
//! let seller = backend.seller(UserId::new(123)).await?;
//! ```

mod mock;
pub mod seed;

pub use mock::MockBackend;

use std::future::Future;

use thiserror::Error;

use campus_market_core::{ProductId, UserId};

use crate::models::{Activity, Notification, Product, Seller};

/// Errors that can occur when talking to the backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Backend could not be reached.
    #[error("backend unavailable: {0}")]
    Unavailable(String),

    /// Response could not be decoded.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Source of catalog data and seller replies.
pub trait MarketBackend: Send + Sync {
    /// Seeded catalog, in display order.
    fn products(&self) -> impl Future<Output = Result<Vec<Product>, BackendError>> + Send;

    /// Seeded product by id.
    fn product(
        &self,
        id: ProductId,
    ) -> impl Future<Output = Result<Option<Product>, BackendError>> + Send;

    /// Public seller profile by id.
    fn seller(&self, id: UserId)
    -> impl Future<Output = Result<Option<Seller>, BackendError>> + Send;

    /// Notifications for the signed-in user, newest first.
    fn notifications(&self) -> impl Future<Output = Result<Vec<Notification>, BackendError>> + Send;

    /// Admin dashboard activity feed, newest first.
    fn recent_activity(&self) -> impl Future<Output = Result<Vec<Activity>, BackendError>> + Send;

    /// Reply from `seller` to a chat message about `product`.
    fn seller_reply(
        &self,
        seller: UserId,
        product: ProductId,
        message: &str,
    ) -> impl Future<Output = Result<String, BackendError>> + Send;
}
