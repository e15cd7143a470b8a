//! Notification feed.

use crate::backend::MarketBackend;
use crate::db::SessionStore;
use crate::error::Result;
use crate::middleware::require_auth;
use crate::models::Notification;

/// Notifications with their unread count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationFeed {
    /// Newest first.
    pub items: Vec<Notification>,
    pub unread: usize,
}

/// Fetch the signed-in user's notifications.
///
/// # Errors
///
/// Returns `MarketError::Rejected` without a session.
/// Returns `MarketError::Backend` if the feed cannot be fetched.
pub async fn feed<B: MarketBackend>(sessions: &SessionStore, backend: &B) -> Result<NotificationFeed> {
    require_auth(sessions.current())?;

    let items = backend.notifications().await?;
    let unread = items.iter().filter(|n| !n.read).count();
    Ok(NotificationFeed { items, unread })
}
