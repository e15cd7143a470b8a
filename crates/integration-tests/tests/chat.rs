//! Integration tests for chatting with a seller.

#![allow(clippy::unwrap_used)]

use campus_market::MarketError;
use campus_market::config::DEFAULT_SELLER_REPLY;
use campus_market::models::Sender;
use campus_market_core::{ProductId, Role, UserId};
use campus_market_integration_tests::TestMarket;

const SELLER: UserId = UserId::new(123);
const PRODUCT: ProductId = ProductId::new(4);

#[tokio::test]
async fn test_transcript_survives_reload() {
    let mut t = TestMarket::new().unwrap();
    t.sign_in("jane@kgkite.ac.in", "abcdef", Role::Student).unwrap();

    let transcript = t
        .market
        .chat()
        .send(SELLER, PRODUCT, "Are the headphones still available?")
        .await
        .unwrap();
    assert_eq!(transcript.len(), 2);

    let t = t.reopen().unwrap();
    let thread = t.market.chat().open(SELLER, PRODUCT).await.unwrap();
    assert_eq!(thread.messages, transcript);
    assert_eq!(thread.messages[1].sender, Sender::Seller);
    assert_eq!(thread.messages[1].text, DEFAULT_SELLER_REPLY);
    assert!(t.path().join("chat_4_123.json").exists());
}

#[tokio::test]
async fn test_transcripts_are_per_product() {
    let mut t = TestMarket::new().unwrap();
    t.sign_in("jane@kgkite.ac.in", "abcdef", Role::Student).unwrap();

    t.market.chat().send(SELLER, PRODUCT, "Hi!").await.unwrap();
    let other = t.market.chat().open(SELLER, ProductId::new(1)).await.unwrap();
    assert!(other.messages.is_empty());
}

#[tokio::test]
async fn test_blank_message_sends_nothing() {
    let mut t = TestMarket::new().unwrap();
    t.sign_in("jane@kgkite.ac.in", "abcdef", Role::Student).unwrap();

    let err = t.market.chat().send(SELLER, PRODUCT, "  \n ").await.unwrap_err();
    assert!(matches!(err, MarketError::EmptyMessage));
    assert!(!t.path().join("chat_4_123.json").exists());
}
