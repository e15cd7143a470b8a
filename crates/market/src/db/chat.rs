//! Chat transcript repository.

use std::sync::Arc;

use campus_market_core::{ProductId, UserId};

use crate::models::ChatMessage;
use crate::storage::{KeyValueStore, StorageError, keys, load_or_default, save_json};

/// Chat transcripts keyed by (product, seller).
pub struct ChatStore {
    store: Arc<dyn KeyValueStore>,
}

impl ChatStore {
    /// Create a chat repository over `store`.
    #[must_use]
    pub const fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Transcript about `product` with `seller`, oldest first.
    #[must_use]
    pub fn transcript(&self, product: ProductId, seller: UserId) -> Vec<ChatMessage> {
        load_or_default(self.store.as_ref(), &keys::chat(product, seller))
    }

    /// Append `message` to the transcript and return the updated transcript.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the transcript cannot be written.
    pub fn append(
        &self,
        product: ProductId,
        seller: UserId,
        message: ChatMessage,
    ) -> Result<Vec<ChatMessage>, StorageError> {
        let mut transcript = self.transcript(product, seller);
        transcript.push(message);
        save_json(self.store.as_ref(), &keys::chat(product, seller), &transcript)?;
        Ok(transcript)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::models::Sender;
    use crate::storage::MemoryStore;

    #[test]
    fn test_transcripts_are_keyed_by_pair() {
        let chats = ChatStore::new(Arc::new(MemoryStore::new()));
        let (product, seller) = (ProductId::new(1), UserId::new(123));

        chats
            .append(product, seller, ChatMessage::now(Sender::User, "Is it available?"))
            .unwrap();
        let transcript = chats
            .append(product, seller, ChatMessage::now(Sender::Seller, "Yes"))
            .unwrap();

        assert_eq!(transcript.len(), 2);
        assert_eq!(chats.transcript(product, seller), transcript);
        assert!(chats.transcript(ProductId::new(2), seller).is_empty());
    }
}
