//! Sell form validation and listing submission.

use std::collections::BTreeMap;
use std::fmt;

use chrono::Utc;
use tracing::instrument;

use campus_market_core::{Category, Condition, Price, PriceError, ProductId};

use crate::db::{ListingStore, SessionStore};
use crate::error::{MarketError, Result};
use crate::middleware::require_auth;
use crate::models::{Listing, ListingForm, SellerRef};
use crate::routes::Route;

/// Minimum description length, in characters, after trimming.
pub const MIN_DESCRIPTION_LENGTH: usize = 10;
/// Maximum number of images on a listing.
pub const MAX_IMAGES: usize = 5;

/// Sell form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Title,
    Category,
    Condition,
    Price,
    Description,
    Location,
    Images,
}

impl Field {
    /// Form field name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Category => "category",
            Self::Condition => "condition",
            Self::Price => "price",
            Self::Description => "description",
            Self::Location => "location",
            Self::Images => "images",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Every rule the form broke, one message per field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<Field, String>);

impl ValidationErrors {
    fn add(&mut self, field: Field, message: &str) {
        self.0.entry(field).or_insert_with(|| message.to_owned());
    }

    /// Message for `field`, if it failed.
    #[must_use]
    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    /// Whether `field` failed.
    #[must_use]
    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    /// Number of failing fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no field failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Failing fields with their messages, in form order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// A sell form that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidListing {
    pub title: String,
    pub description: String,
    pub price: Price,
    pub category: Category,
    pub condition: Condition,
    pub location: String,
    pub images: Vec<String>,
}

/// Check every field of a sell form.
///
/// # Errors
///
/// Returns `ValidationErrors` holding one message per failing field.
pub fn validate(form: &ListingForm) -> std::result::Result<ValidListing, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let title = form.title.trim();
    if title.is_empty() {
        errors.add(Field::Title, "Title is required");
    }

    let category = form.category.parse::<Category>().ok();
    if category.is_none() {
        errors.add(Field::Category, "Category is required");
    }

    let condition = form.condition.parse::<Condition>().ok();
    if condition.is_none() {
        errors.add(Field::Condition, "Condition is required");
    }

    let price = match Price::parse(&form.price) {
        Ok(price) => Some(price),
        Err(PriceError::Missing) => {
            errors.add(Field::Price, "Price is required");
            None
        }
        Err(PriceError::NotANumber | PriceError::NotPositive) => {
            errors.add(Field::Price, "Valid price is required");
            None
        }
    };

    let description = form.description.trim();
    if description.is_empty() {
        errors.add(Field::Description, "Description is required");
    } else if description.chars().count() < MIN_DESCRIPTION_LENGTH {
        errors.add(Field::Description, "Description must be at least 10 characters");
    }

    let location = form.location.trim();
    if location.is_empty() {
        errors.add(Field::Location, "Location is required");
    }

    let images: Vec<String> = form
        .images
        .iter()
        .map(|image| image.trim())
        .filter(|image| !image.is_empty())
        .map(str::to_owned)
        .collect();
    if images.is_empty() {
        errors.add(Field::Images, "At least one image is required");
    } else if images.len() > MAX_IMAGES {
        errors.add(Field::Images, "Maximum 5 images allowed");
    }

    match (category, condition, price) {
        (Some(category), Some(condition), Some(price)) if errors.is_empty() => Ok(ValidListing {
            title: title.to_owned(),
            description: description.to_owned(),
            price,
            category,
            condition,
            location: location.to_owned(),
            images,
        }),
        _ => Err(errors),
    }
}

/// A listing that was stored, and where to go next.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitOutcome {
    pub listing: Listing,
    pub redirect: Route,
}

/// Listing submission service.
pub struct ListingService<'a> {
    sessions: &'a SessionStore,
    listings: &'a mut ListingStore,
}

impl<'a> ListingService<'a> {
    /// Create a new listing service.
    pub const fn new(sessions: &'a SessionStore, listings: &'a mut ListingStore) -> Self {
        Self { sessions, listings }
    }

    /// Validate the form and store it as a listing by the current user.
    ///
    /// # Errors
    ///
    /// Returns `MarketError::Rejected` without a session (checked first).
    /// Returns `MarketError::Validation` if any field fails.
    /// Returns `MarketError::Storage` if the collection cannot be written.
    #[instrument(skip(self, form), fields(title = %form.title))]
    pub fn submit(&mut self, form: &ListingForm) -> Result<SubmitOutcome> {
        let seller = require_auth(self.sessions.current())?;
        let valid = validate(form)?;

        let listing = Listing {
            id: self.next_id(),
            title: valid.title,
            description: valid.description,
            price: valid.price,
            category: valid.category,
            condition: valid.condition,
            location: valid.location,
            images: valid.images,
            seller: SellerRef {
                id: seller.id,
                name: seller.name.clone(),
            },
            created_at: Utc::now(),
        };

        self.listings.append(listing.clone()).map_err(MarketError::from)?;
        tracing::info!(listing_id = %listing.id, seller_id = %listing.seller.id, "listing created");

        Ok(SubmitOutcome {
            listing,
            redirect: Route::Profile,
        })
    }

    /// Current epoch millis, bumped past the newest stored id.
    ///
    /// When the newest id cannot be bumped, the first free id from now on is
    /// used instead.
    fn next_id(&self) -> ProductId {
        let now = Utc::now().timestamp_millis();
        let bumped = match self.listings.max_id() {
            Some(max) if max.as_i64() >= now => max.as_i64().checked_add(1),
            _ => Some(now),
        };
        bumped.map_or_else(|| self.first_free_id(now), ProductId::new)
    }

    fn first_free_id(&self, from: i64) -> ProductId {
        (from..=i64::MAX)
            .map(ProductId::new)
            .find(|id| self.listings.get(*id).is_none())
            .unwrap_or(ProductId::new(from))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use campus_market_core::{Email, Role, UserId};

    use super::*;
    use crate::middleware::AuthRejection;
    use crate::models::SessionUser;
    use crate::storage::{KeyValueStore, MemoryStore, keys};

    fn form() -> ListingForm {
        ListingForm {
            title: "Calculus Textbook 5th Edition".to_string(),
            description: "No highlights or notes".to_string(),
            price: "19.99".to_string(),
            category: "Books".to_string(),
            condition: "Like New".to_string(),
            location: "Library".to_string(),
            images: vec!["calculus.jpg".to_string()],
        }
    }

    #[test]
    fn test_valid_form() {
        let valid = validate(&form()).unwrap();
        assert_eq!(valid.price, Price::parse("19.99").unwrap());
        assert_eq!(valid.category, Category::Books);
        assert_eq!(valid.condition, Condition::LikeNew);
    }

    #[test]
    fn test_price_rules() {
        for (input, message) in [
            ("-5", "Valid price is required"),
            ("0", "Valid price is required"),
            ("ten", "Valid price is required"),
            ("  ", "Price is required"),
        ] {
            let errors = validate(&ListingForm {
                price: input.to_string(),
                ..form()
            })
            .unwrap_err();
            assert_eq!(errors.get(Field::Price), Some(message), "price {input:?}");
            assert_eq!(errors.len(), 1);
        }
    }

    #[test]
    fn test_empty_form_reports_every_field() {
        let errors = validate(&ListingForm::default()).unwrap_err();
        assert_eq!(errors.len(), 7);
        assert_eq!(errors.get(Field::Title), Some("Title is required"));
        assert_eq!(errors.get(Field::Description), Some("Description is required"));
        assert_eq!(errors.get(Field::Images), Some("At least one image is required"));
    }

    #[test]
    fn test_description_length() {
        let short = ListingForm {
            description: "  too short ".to_string(),
            ..form()
        };
        assert_eq!(
            validate(&short).unwrap_err().get(Field::Description),
            Some("Description must be at least 10 characters")
        );

        let exact = ListingForm {
            description: "0123456789".to_string(),
            ..form()
        };
        assert!(validate(&exact).is_ok());
    }

    #[test]
    fn test_unknown_category_and_condition() {
        let errors = validate(&ListingForm {
            category: "Pets".to_string(),
            condition: "Broken".to_string(),
            ..form()
        })
        .unwrap_err();
        assert!(errors.contains(Field::Category));
        assert!(errors.contains(Field::Condition));
    }

    #[test]
    fn test_image_limit() {
        let errors = validate(&ListingForm {
            images: (0..6).map(|i| format!("{i}.jpg")).collect(),
            ..form()
        })
        .unwrap_err();
        assert_eq!(errors.get(Field::Images), Some("Maximum 5 images allowed"));
    }

    #[test]
    fn test_display_lists_fields_in_form_order() {
        let errors = validate(&ListingForm {
            title: String::new(),
            location: String::new(),
            ..form()
        })
        .unwrap_err();
        assert_eq!(errors.to_string(), "title: Title is required; location: Location is required");
    }

    fn signed_in() -> (SessionStore, ListingStore) {
        signed_in_over(Arc::new(MemoryStore::new()))
    }

    fn signed_in_over(store: Arc<dyn KeyValueStore>) -> (SessionStore, ListingStore) {
        let mut sessions = SessionStore::load(Arc::clone(&store));
        sessions
            .save(SessionUser {
                id: UserId::new(42),
                name: "Jane".to_string(),
                email: Email::parse("jane@kgkite.ac.in").unwrap(),
                role: Role::Student,
                is_authenticated: true,
                bio: None,
                university: None,
                program: None,
                year: None,
                member_since: None,
            })
            .unwrap();
        (sessions, ListingStore::load(store))
    }

    #[test]
    fn test_submit_stores_listing() {
        let (sessions, mut listings) = signed_in();
        let outcome = ListingService::new(&sessions, &mut listings).submit(&form()).unwrap();

        assert_eq!(outcome.redirect, Route::Profile);
        assert_eq!(outcome.listing.seller.id, UserId::new(42));
        assert_eq!(listings.len(), 1);
    }

    #[test]
    fn test_submit_invalid_stores_nothing() {
        let (sessions, mut listings) = signed_in();
        let err = ListingService::new(&sessions, &mut listings)
            .submit(&ListingForm {
                price: "0".to_string(),
                ..form()
            })
            .unwrap_err();

        assert!(matches!(err, MarketError::Validation(ref e) if e.contains(Field::Price)));
        assert!(listings.is_empty());
    }

    #[test]
    fn test_submit_requires_session() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let sessions = SessionStore::load(Arc::clone(&store));
        let mut listings = ListingStore::load(store);

        let err = ListingService::new(&sessions, &mut listings).submit(&form()).unwrap_err();
        assert!(matches!(err, MarketError::Rejected(AuthRejection::SignInRequired)));
    }

    #[test]
    fn test_ids_are_unique_within_a_millisecond() {
        let (sessions, mut listings) = signed_in();
        let mut service = ListingService::new(&sessions, &mut listings);
        let first = service.submit(&form()).unwrap().listing.id;
        let second = service.submit(&form()).unwrap().listing.id;
        assert!(second > first);
    }

    #[test]
    fn test_id_after_largest_possible_stored_id() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let (sessions, mut listings) = signed_in_over(Arc::clone(&store));
        ListingService::new(&sessions, &mut listings).submit(&form()).unwrap();

        let raw = store.get(keys::PRODUCTS).unwrap().unwrap();
        let mut stored: serde_json::Value = serde_json::from_str(&raw).unwrap();
        stored[0]["id"] = serde_json::json!(i64::MAX);
        store.set(keys::PRODUCTS, &stored.to_string()).unwrap();

        let mut listings = ListingStore::load(store);
        assert_eq!(listings.max_id(), Some(ProductId::new(i64::MAX)));

        let id = ListingService::new(&sessions, &mut listings)
            .submit(&form())
            .unwrap()
            .listing
            .id;
        assert_ne!(id, ProductId::new(i64::MAX));
        assert_eq!(listings.len(), 2);
    }
}
