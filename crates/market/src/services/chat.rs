//! Chatting with a seller about a product.

use tracing::instrument;

use campus_market_core::{ProductId, UserId};

use crate::backend::MarketBackend;
use crate::db::{ChatStore, ListingStore, SessionStore};
use crate::error::{MarketError, Result};
use crate::middleware::require_auth;
use crate::models::{ChatMessage, Product, Seller, Sender};
use crate::services::browse::BrowseService;

/// An open conversation.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatThread {
    pub product: Product,
    pub seller: Seller,
    /// Oldest first.
    pub messages: Vec<ChatMessage>,
}

/// Chat service.
pub struct ChatService<'a, B> {
    sessions: &'a SessionStore,
    listings: &'a ListingStore,
    chats: &'a ChatStore,
    backend: &'a B,
}

impl<'a, B: MarketBackend> ChatService<'a, B> {
    /// Create a new chat service.
    pub const fn new(
        sessions: &'a SessionStore,
        listings: &'a ListingStore,
        chats: &'a ChatStore,
        backend: &'a B,
    ) -> Self {
        Self {
            sessions,
            listings,
            chats,
            backend,
        }
    }

    /// Load the product, the seller and the stored transcript.
    ///
    /// # Errors
    ///
    /// Returns `MarketError::Rejected` without a session.
    /// Returns `MarketError::NotFound` for an unknown product or seller.
    #[instrument(skip(self))]
    pub async fn open(&self, seller: UserId, product: ProductId) -> Result<ChatThread> {
        require_auth(self.sessions.current())?;
        let browse = BrowseService::new(self.listings, self.backend);

        let product_page = browse.product(product).await?;
        let seller_page = browse.seller(seller).await?;

        Ok(ChatThread {
            product: product_page,
            seller: seller_page.seller,
            messages: self.chats.transcript(product, seller),
        })
    }

    /// Send `text` to the seller and wait for their reply.
    ///
    /// The user's message is stored before the backend is asked for a reply,
    /// so it survives a failed round trip.
    ///
    /// # Errors
    ///
    /// Returns `MarketError::EmptyMessage` for blank text.
    /// Returns `MarketError::Rejected` without a session.
    /// Returns `MarketError::Storage` or `MarketError::Backend` if the round
    /// trip fails.
    #[instrument(skip(self, text))]
    pub async fn send(
        &self,
        seller: UserId,
        product: ProductId,
        text: &str,
    ) -> Result<Vec<ChatMessage>> {
        require_auth(self.sessions.current())?;

        let text = text.trim();
        if text.is_empty() {
            return Err(MarketError::EmptyMessage);
        }

        self.chats
            .append(product, seller, ChatMessage::now(Sender::User, text))?;

        let reply = self.backend.seller_reply(seller, product, text).await?;
        let transcript = self
            .chats
            .append(product, seller, ChatMessage::now(Sender::Seller, reply))?;

        tracing::debug!(messages = transcript.len(), "chat updated");
        Ok(transcript)
    }
}
