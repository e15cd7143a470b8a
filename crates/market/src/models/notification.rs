//! Notification and admin activity feed types.

use serde::{Deserialize, Serialize};

use campus_market_core::{ActivityId, NotificationId};

/// Kind of notification, used for the icon in the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Trending,
    Info,
    Listing,
    Favorite,
}

/// A notification shown on the notifications page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub time: String,
    pub read: bool,
}

/// An entry in the admin dashboard's recent activity feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub id: ActivityId,
    pub action: String,
    pub item: String,
    pub user: String,
    pub time: String,
}
