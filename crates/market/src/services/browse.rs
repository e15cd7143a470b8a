//! Catalog browsing: home sections, product and seller pages, favorites views.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use tracing::instrument;

use campus_market_core::{Category, ProductId, UnknownLabel, UserId};

use crate::backend::MarketBackend;
use crate::db::ListingStore;
use crate::error::{MarketError, Result};
use crate::models::{Product, ProductSnapshot, Seller};

/// Maximum number of products in each home section.
pub const HOME_SECTION_LIMIT: usize = 5;

/// Category selection on the home page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Whether `product` passes the filter.
    #[must_use]
    pub fn matches(self, product: &Product) -> bool {
        match self {
            Self::All => true,
            Self::Only(category) => product.category == category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(Self::All)
        } else {
            s.parse().map(Self::Only)
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("All"),
            Self::Only(category) => write!(f, "{category}"),
        }
    }
}

/// Ordering options for the favorites page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Order in which the favorites were added.
    #[default]
    Recent,
    PriceLow,
    PriceHigh,
    NameAsc,
    NameDesc,
}

impl SortOrder {
    /// Every option, in menu order.
    pub const ALL: [Self; 5] = [
        Self::Recent,
        Self::PriceLow,
        Self::PriceHigh,
        Self::NameAsc,
        Self::NameDesc,
    ];

    /// Option value, e.g. `price-low`.
    #[must_use]
    pub const fn value(self) -> &'static str {
        match self {
            Self::Recent => "recent",
            Self::PriceLow => "price-low",
            Self::PriceHigh => "price-high",
            Self::NameAsc => "name-asc",
            Self::NameDesc => "name-desc",
        }
    }

    /// Menu label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Recent => "Recently Added",
            Self::PriceLow => "Price: Low to High",
            Self::PriceHigh => "Price: High to Low",
            Self::NameAsc => "Name: A to Z",
            Self::NameDesc => "Name: Z to A",
        }
    }
}

impl FromStr for SortOrder {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|order| order.value().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownLabel(s.to_owned()))
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

/// Favorites in the requested order. Sorting is stable.
#[must_use]
pub fn sort_favorites(favorites: &[ProductSnapshot], order: SortOrder) -> Vec<ProductSnapshot> {
    let mut sorted = favorites.to_vec();
    match order {
        SortOrder::Recent => {}
        SortOrder::PriceLow => sorted.sort_by_key(|item| item.price),
        SortOrder::PriceHigh => sorted.sort_by(|a, b| b.price.cmp(&a.price)),
        SortOrder::NameAsc => sorted.sort_by(|a, b| compare_titles(&a.title, &b.title)),
        SortOrder::NameDesc => sorted.sort_by(|a, b| compare_titles(&b.title, &a.title)),
    }
    sorted
}

fn compare_titles(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b))
}

/// Home page sections.
#[derive(Debug, Clone, PartialEq)]
pub struct HomeSections {
    pub filter: CategoryFilter,
    /// Highest rated first.
    pub trending: Vec<Product>,
    /// Catalog order.
    pub recent: Vec<Product>,
}

/// A seller with the products they have on offer.
#[derive(Debug, Clone, PartialEq)]
pub struct SellerPage {
    pub seller: Seller,
    pub products: Vec<Product>,
}

/// Read-only views over submitted listings and the backend catalog.
pub struct BrowseService<'a, B> {
    listings: &'a ListingStore,
    backend: &'a B,
}

impl<'a, B: MarketBackend> BrowseService<'a, B> {
    /// Create a new browse service.
    pub const fn new(listings: &'a ListingStore, backend: &'a B) -> Self {
        Self { listings, backend }
    }

    /// Submitted listings followed by seeded products with unseen ids.
    ///
    /// # Errors
    ///
    /// Returns `MarketError::Backend` if the catalog cannot be fetched.
    pub async fn catalog(&self) -> Result<Vec<Product>> {
        let mut catalog: Vec<Product> = self.listings.all().iter().map(|l| l.to_product()).collect();
        let seeded = self.backend.products().await?;

        for product in seeded {
            if !catalog.iter().any(|p| p.id == product.id) {
                catalog.push(product);
            }
        }
        Ok(catalog)
    }

    /// Trending and recent sections, filtered by category.
    ///
    /// Both sections show the first products of the filtered catalog.
    ///
    /// # Errors
    ///
    /// Returns `MarketError::Backend` if the catalog cannot be fetched.
    #[instrument(skip_all, fields(filter = %filter))]
    pub async fn home(&self, filter: CategoryFilter) -> Result<HomeSections> {
        let matching: Vec<Product> = self
            .catalog()
            .await?
            .into_iter()
            .filter(|p| filter.matches(p))
            .collect();

        let mut recent = matching;
        recent.truncate(HOME_SECTION_LIMIT);
        let trending = recent.clone();

        Ok(HomeSections {
            filter,
            trending,
            recent,
        })
    }

    /// Product by id, submitted listings first.
    ///
    /// # Errors
    ///
    /// Returns `MarketError::NotFound` for an unknown id.
    #[instrument(skip(self))]
    pub async fn product(&self, id: ProductId) -> Result<Product> {
        if let Some(listing) = self.listings.get(id) {
            return Ok(listing.to_product());
        }

        self.backend
            .product(id)
            .await?
            .ok_or_else(|| MarketError::NotFound(format!("Product {id}")))
    }

    /// Seller profile with their products.
    ///
    /// # Errors
    ///
    /// Returns `MarketError::NotFound` for an unknown seller.
    #[instrument(skip(self))]
    pub async fn seller(&self, id: UserId) -> Result<SellerPage> {
        let seller = self
            .backend
            .seller(id)
            .await?
            .ok_or_else(|| MarketError::NotFound(format!("Seller {id}")))?;

        let products = self
            .catalog()
            .await?
            .into_iter()
            .filter(|p| p.seller.as_ref().is_some_and(|s| s.id == id))
            .collect();

        Ok(SellerPage { seller, products })
    }

    /// Listings the user has submitted, in submission order.
    #[must_use]
    pub fn profile_listings(&self, user: UserId) -> Vec<Product> {
        self.listings.by_seller(user).map(|l| l.to_product()).collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use campus_market_core::{Condition, Price};
    use chrono::Utc;

    use super::*;
    use crate::backend::MockBackend;
    use crate::models::{Listing, SellerRef};
    use crate::storage::{KeyValueStore, MemoryStore};

    fn listing(id: i64, title: &str, category: Category) -> Listing {
        Listing {
            id: ProductId::new(id),
            title: title.to_string(),
            description: "Barely used, works great".to_string(),
            price: Price::parse("30").unwrap(),
            category,
            condition: Condition::Good,
            location: "Library".to_string(),
            images: vec!["item.jpg".to_string()],
            seller: SellerRef {
                id: UserId::new(42),
                name: "Jane".to_string(),
            },
            created_at: Utc::now(),
        }
    }

    fn listings(items: Vec<Listing>) -> ListingStore {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let mut listings = ListingStore::load(store);
        for item in items {
            listings.append(item).unwrap();
        }
        listings
    }

    fn snapshot(id: i64, title: &str, price: &str) -> ProductSnapshot {
        ProductSnapshot {
            id: ProductId::new(id),
            title: title.to_string(),
            price: Price::parse(price).unwrap(),
            image: None,
            description: String::new(),
            condition: None,
            location: String::new(),
            category: None,
            rating: None,
            time_ago: None,
            is_favorite: true,
        }
    }

    #[tokio::test]
    async fn test_catalog_puts_listings_first_and_dedups() {
        let listings = listings(vec![
            listing(1_700_000_000_000, "Graphing Calculator", Category::Electronics),
            listing(2, "My Calculus Notes", Category::Books),
        ]);
        let backend = MockBackend::instant();
        let catalog = BrowseService::new(&listings, &backend).catalog().await.unwrap();

        assert_eq!(catalog.len(), 11);
        assert_eq!(catalog[0].title, "Graphing Calculator");
        assert_eq!(catalog[1].title, "My Calculus Notes");
        assert_eq!(catalog.iter().filter(|p| p.id == ProductId::new(2)).count(), 1);
    }

    #[tokio::test]
    async fn test_home_sections() {
        let listings = listings(vec![]);
        let backend = MockBackend::instant();
        let home = BrowseService::new(&listings, &backend)
            .home(CategoryFilter::All)
            .await
            .unwrap();

        assert_eq!(home.trending.len(), HOME_SECTION_LIMIT);
        assert_eq!(home.recent[0].title, "MacBook Pro 2019");
        assert_eq!(home.trending, home.recent);
    }

    #[tokio::test]
    async fn test_home_category_filter() {
        let listings = listings(vec![]);
        let backend = MockBackend::instant();
        let filter: CategoryFilter = "books".parse().unwrap();
        let home = BrowseService::new(&listings, &backend).home(filter).await.unwrap();

        assert_eq!(home.recent.len(), 2);
        assert!(home.recent.iter().all(|p| p.category == Category::Books));
        assert_eq!(home.trending[0].title, "Calculus Textbook 5th Edition");
    }

    #[test]
    fn test_category_filter_parse() {
        assert_eq!("ALL".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!(
            "Electronics".parse::<CategoryFilter>().unwrap(),
            CategoryFilter::Only(Category::Electronics)
        );
        assert!("Pets".parse::<CategoryFilter>().is_err());
    }

    #[tokio::test]
    async fn test_product_lookup() {
        let listings = listings(vec![listing(1_700_000_000_000, "Graphing Calculator", Category::Electronics)]);
        let backend = MockBackend::instant();
        let browse = BrowseService::new(&listings, &backend);

        let stored = browse.product(ProductId::new(1_700_000_000_000)).await.unwrap();
        assert_eq!(stored.seller.unwrap().id, UserId::new(42));
        assert_eq!(browse.product(ProductId::new(9)).await.unwrap().title, "Acoustic Guitar");
        assert!(matches!(
            browse.product(ProductId::new(404)).await,
            Err(MarketError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_seller_page() {
        let listings = listings(vec![]);
        let backend = MockBackend::instant();
        let browse = BrowseService::new(&listings, &backend);

        let page = browse.seller(UserId::new(123)).await.unwrap();
        assert_eq!(page.products.len(), 3);
        assert!(matches!(browse.seller(UserId::new(5)).await, Err(MarketError::NotFound(_))));
    }

    #[test]
    fn test_profile_listings() {
        let listings = listings(vec![listing(100, "Lamp", Category::Electronics)]);
        let backend = MockBackend::instant();
        let browse = BrowseService::new(&listings, &backend);

        assert_eq!(browse.profile_listings(UserId::new(42)).len(), 1);
        assert!(browse.profile_listings(UserId::new(7)).is_empty());
    }

    #[test]
    fn test_sort_favorites() {
        let favorites = vec![
            snapshot(1, "mini fridge", "75"),
            snapshot(2, "Acoustic Guitar", "150"),
            snapshot(3, "Desk Lamp", "28"),
        ];
        let titles = |order| {
            sort_favorites(&favorites, order)
                .into_iter()
                .map(|s| s.title)
                .collect::<Vec<_>>()
        };

        assert_eq!(titles(SortOrder::Recent), ["mini fridge", "Acoustic Guitar", "Desk Lamp"]);
        assert_eq!(titles(SortOrder::PriceLow), ["Desk Lamp", "mini fridge", "Acoustic Guitar"]);
        assert_eq!(titles(SortOrder::PriceHigh), ["Acoustic Guitar", "mini fridge", "Desk Lamp"]);
        assert_eq!(titles(SortOrder::NameAsc), ["Acoustic Guitar", "Desk Lamp", "mini fridge"]);
        assert_eq!(titles(SortOrder::NameDesc), ["mini fridge", "Desk Lamp", "Acoustic Guitar"]);
    }

    #[test]
    fn test_sort_order_parse() {
        assert_eq!("price-high".parse::<SortOrder>().unwrap(), SortOrder::PriceHigh);
        assert!("cheapest".parse::<SortOrder>().is_err());
    }
}
