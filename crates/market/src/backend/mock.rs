//! Backend serving seeded data after a simulated delay.

use tracing::instrument;

use campus_market_core::{ProductId, UserId};

use super::{BackendError, MarketBackend, seed};
use crate::config::BackendConfig;
use crate::models::{Activity, Notification, Product, Seller};

/// In-process backend over the seeded catalog.
#[derive(Debug, Clone)]
pub struct MockBackend {
    config: BackendConfig,
    products: Vec<Product>,
    sellers: Vec<Seller>,
}

impl MockBackend {
    /// Create a backend over the seeded data.
    #[must_use]
    pub fn new(config: BackendConfig) -> Self {
        Self {
            config,
            products: seed::products(),
            sellers: seed::sellers(),
        }
    }

    /// Backend with no delay, for tests.
    #[must_use]
    pub fn instant() -> Self {
        Self::new(BackendConfig::instant())
    }

    async fn delay(&self) {
        if !self.config.latency.is_zero() {
            tokio::time::sleep(self.config.latency).await;
        }
    }
}

impl MarketBackend for MockBackend {
    async fn products(&self) -> Result<Vec<Product>, BackendError> {
        self.delay().await;
        Ok(self.products.clone())
    }

    #[instrument(skip(self))]
    async fn product(&self, id: ProductId) -> Result<Option<Product>, BackendError> {
        self.delay().await;
        Ok(self.products.iter().find(|p| p.id == id).cloned())
    }

    #[instrument(skip(self))]
    async fn seller(&self, id: UserId) -> Result<Option<Seller>, BackendError> {
        self.delay().await;
        Ok(self.sellers.iter().find(|s| s.id == id).cloned())
    }

    async fn notifications(&self) -> Result<Vec<Notification>, BackendError> {
        self.delay().await;
        Ok(seed::notifications())
    }

    async fn recent_activity(&self) -> Result<Vec<Activity>, BackendError> {
        self.delay().await;
        Ok(seed::activity())
    }

    #[instrument(skip(self, message))]
    async fn seller_reply(
        &self,
        seller: UserId,
        product: ProductId,
        message: &str,
    ) -> Result<String, BackendError> {
        self.delay().await;
        tracing::debug!(chars = message.chars().count(), "seller replying");
        Ok(self.config.seller_reply.clone())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn test_product_lookup() {
        let backend = MockBackend::instant();
        let product = backend.product(ProductId::new(4)).await.unwrap().unwrap();
        assert_eq!(product.title, "Sony WH-1000XM4 Headphones");
        assert!(backend.product(ProductId::new(999)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_seller_lookup() {
        let backend = MockBackend::instant();
        let seller = backend.seller(UserId::new(123)).await.unwrap().unwrap();
        assert_eq!(seller.name, "Alex Johnson");
        assert_eq!(seller.reviews.len(), 3);
        assert!(backend.seller(UserId::new(1)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_seller_reply_uses_configured_text() {
        let backend = MockBackend::new(BackendConfig {
            latency: Duration::ZERO,
            seller_reply: "Still available!".to_string(),
        });
        let reply = backend
            .seller_reply(UserId::new(123), ProductId::new(1), "Is this available?")
            .await
            .unwrap();
        assert_eq!(reply, "Still available!");
    }

    #[tokio::test]
    async fn test_latency_is_applied() {
        let backend = MockBackend::new(BackendConfig {
            latency: Duration::from_millis(20),
            ..BackendConfig::default()
        });

        let start = tokio::time::Instant::now();
        backend.notifications().await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(20));
    }
}
