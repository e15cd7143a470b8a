//! User-submitted listings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use campus_market_core::{Category, Condition, Price, ProductId};

use super::product::{Product, SellerRef};

/// Raw sell form input, exactly as typed.
///
/// Nothing here is validated; see [`crate::services::listing::validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingForm {
    pub title: String,
    pub description: String,
    pub price: String,
    pub category: String,
    pub condition: String,
    pub location: String,
    /// Image references (paths or URLs), cover first.
    pub images: Vec<String>,
}

/// A listing submitted through the sell form and stored under `products`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    /// Creation time in epoch milliseconds.
    pub id: ProductId,
    pub title: String,
    pub description: String,
    pub price: Price,
    pub category: Category,
    pub condition: Condition,
    pub location: String,
    pub images: Vec<String>,
    pub seller: SellerRef,
    pub created_at: DateTime<Utc>,
}

impl Listing {
    /// View this listing as a browsable product.
    #[must_use]
    pub fn to_product(&self) -> Product {
        Product {
            id: self.id,
            title: self.title.clone(),
            description: self.description.clone(),
            price: self.price,
            images: self.images.clone(),
            condition: self.condition,
            location: self.location.clone(),
            category: self.category,
            rating: None,
            time_ago: None,
            seller: Some(self.seller.clone()),
        }
    }
}
