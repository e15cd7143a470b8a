//! Product and seller types.

use serde::{Deserialize, Serialize};

use campus_market_core::{Category, Condition, Price, ProductId, ReviewId, UserId};

/// Reference from a product to the user selling it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SellerRef {
    pub id: UserId,
    pub name: String,
}

/// A product as shown in browse views.
///
/// Seeded catalog items and submitted listings both end up as a `Product`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub description: String,
    pub price: Price,
    /// Image references, cover first.
    pub images: Vec<String>,
    pub condition: Condition,
    pub location: String,
    pub category: Category,
    #[serde(default)]
    pub rating: Option<f32>,
    /// Human-readable age label such as "2 days ago".
    #[serde(default)]
    pub time_ago: Option<String>,
    #[serde(default)]
    pub seller: Option<SellerRef>,
}

impl Product {
    /// Cover image, if any.
    #[must_use]
    pub fn cover_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

/// Copy of a product taken when it was added to favorites.
///
/// Later edits to the product do not show up in the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSnapshot {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub condition: Option<Condition>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub rating: Option<f32>,
    #[serde(default)]
    pub time_ago: Option<String>,
    /// Always `true` inside the favorites collection.
    #[serde(default = "default_true")]
    pub is_favorite: bool,
}

const fn default_true() -> bool {
    true
}

impl From<&Product> for ProductSnapshot {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            price: product.price,
            image: product.cover_image().map(str::to_owned),
            description: product.description.clone(),
            condition: Some(product.condition),
            location: product.location.clone(),
            category: Some(product.category),
            rating: product.rating,
            time_ago: product.time_ago.clone(),
            is_favorite: true,
        }
    }
}

/// A review left on a seller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    pub reviewer: String,
    pub rating: u8,
    pub comment: String,
    pub date: String,
}

/// Public seller profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seller {
    pub id: UserId,
    pub name: String,
    #[serde(default)]
    pub avatar: Option<String>,
    pub rating: f32,
    pub member_since: String,
    pub response_rate: String,
    pub response_time: String,
    pub location: String,
    pub verified: bool,
    pub bio: String,
    #[serde(default)]
    pub reviews: Vec<Review>,
}
