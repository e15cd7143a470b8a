//! Client-side route table.
//!
//! # Route Structure
//!
//! ```text
//! /                                    - Index (redirects)
//! /signin                              - Sign in (guests only)
//! /signup                              - Sign up (guests only)
//!
//! # Requires auth
//! /home                                - Trending and recent listings
//! /product/:id                         - Product detail
//! /profile                             - Own profile and listings
//! /sell                                - Sell form
//! /favorites                           - Favorites
//! /notifications                       - Notifications
//! /chat/:sellerId/product/:productId   - Chat with seller about a product
//! /seller/:sellerId                    - Seller profile
//! /admin                               - Admin dashboard (admins only)
//!
//! *                                    - Not found
//! ```

use std::fmt;

use campus_market_core::{ProductId, Role, UserId};

/// A navigable view.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Index,
    SignIn,
    SignUp,
    Home,
    Product(ProductId),
    Profile,
    Sell,
    Favorites,
    Notifications,
    Chat { seller: UserId, product: ProductId },
    Seller(UserId),
    Admin,
    /// Unknown path, kept for display.
    NotFound(String),
}

impl Route {
    /// Resolve a path such as `/product/3?ref=home` to a route.
    ///
    /// Query strings, fragments and a trailing slash are ignored. Malformed
    /// ids resolve to [`Route::NotFound`].
    #[must_use]
    pub fn parse(path: &str) -> Self {
        let bare = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim();
        let segments: Vec<&str> = bare.split('/').filter(|s| !s.is_empty()).collect();

        let route = match segments.as_slice() {
            [] => Some(Self::Index),
            ["signin"] => Some(Self::SignIn),
            ["signup"] => Some(Self::SignUp),
            ["home"] => Some(Self::Home),
            ["product", id] => id.parse().ok().map(Self::Product),
            ["profile"] => Some(Self::Profile),
            ["sell"] => Some(Self::Sell),
            ["favorites"] => Some(Self::Favorites),
            ["notifications"] => Some(Self::Notifications),
            ["chat", seller, "product", product] => match (seller.parse(), product.parse()) {
                (Ok(seller), Ok(product)) => Some(Self::Chat { seller, product }),
                _ => None,
            },
            ["seller", id] => id.parse().ok().map(Self::Seller),
            ["admin"] => Some(Self::Admin),
            _ => None,
        };

        route.unwrap_or_else(|| Self::NotFound(bare.to_owned()))
    }

    /// Path for this route.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Index => "/".to_string(),
            Self::SignIn => "/signin".to_string(),
            Self::SignUp => "/signup".to_string(),
            Self::Home => "/home".to_string(),
            Self::Product(id) => format!("/product/{id}"),
            Self::Profile => "/profile".to_string(),
            Self::Sell => "/sell".to_string(),
            Self::Favorites => "/favorites".to_string(),
            Self::Notifications => "/notifications".to_string(),
            Self::Chat { seller, product } => format!("/chat/{seller}/product/{product}"),
            Self::Seller(id) => format!("/seller/{id}"),
            Self::Admin => "/admin".to_string(),
            Self::NotFound(path) => path.clone(),
        }
    }

    /// Whether the route requires a signed-in session.
    #[must_use]
    pub const fn is_protected(&self) -> bool {
        matches!(
            self,
            Self::Home
                | Self::Product(_)
                | Self::Profile
                | Self::Sell
                | Self::Favorites
                | Self::Notifications
                | Self::Chat { .. }
                | Self::Seller(_)
                | Self::Admin
        )
    }

    /// Whether the route is only meaningful for signed-out visitors.
    #[must_use]
    pub const fn is_guest_only(&self) -> bool {
        matches!(self, Self::SignIn | Self::SignUp)
    }

    /// Where a user with `role` lands after signing in.
    #[must_use]
    pub const fn landing_for(role: Role) -> Self {
        match role {
            Role::Admin => Self::Admin,
            Role::Student => Self::Home,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
