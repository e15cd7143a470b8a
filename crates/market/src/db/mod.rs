//! Repositories over the device key-value store.
//!
//! Each repository owns one slice of the storage layout (see
//! [`crate::storage`]) and keeps an in-memory copy of what it loaded:
//!
//! - [`SessionStore`] - the `user` session record
//! - [`FavoritesStore`] - the `favorites` collection
//! - [`ListingStore`] - the `products` collection of submitted listings
//! - [`ProfileStore`] - `userProfile_<email>` records
//! - [`ChatStore`] - `chat_<productId>_<sellerId>` transcripts
//!
//! Loading never fails: absent or malformed documents load as empty state.
//! Every mutation writes the whole document back before returning.

pub mod chat;
pub mod favorites;
pub mod listings;
pub mod profiles;
pub mod session;

pub use chat::ChatStore;
pub use favorites::FavoritesStore;
pub use listings::ListingStore;
pub use profiles::ProfileStore;
pub use session::SessionStore;
