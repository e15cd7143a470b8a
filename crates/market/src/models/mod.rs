//! Domain models for the marketplace.
//!
//! Field names serialize in camelCase so persisted documents keep the layout
//! the web client has always written to device storage.

pub mod chat;
pub mod listing;
pub mod notification;
pub mod product;
pub mod user;

pub use chat::{ChatMessage, Sender};
pub use listing::{Listing, ListingForm};
pub use notification::{Activity, Notification, NotificationKind};
pub use product::{Product, ProductSnapshot, Review, Seller, SellerRef};
pub use user::{SessionState, SessionUser, UserProfile};
