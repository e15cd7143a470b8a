//! Browse commands.
//!
//! # Usage
//!
//! ```bash
//! campus open /admin
//! campus home --category electronics
//! campus product 4
//! campus favorite 4
//! campus favorites --sort name-asc
//! campus seller 123
//! ```

use campus_market::middleware::RouteDecision;
use campus_market::routes::Route;
use campus_market::services::browse::{CategoryFilter, SortOrder};
use campus_market_core::{ProductId, UserId};

use super::{App, CliError, enter, product_line};

/// Resolve `path` through the route guard and show the outcome.
#[allow(clippy::print_stdout)]
pub fn open(market: &App, path: &str) {
    match market.navigate(path) {
        RouteDecision::Render(Route::NotFound(path)) => println!("404: {path} not found"),
        RouteDecision::Render(route) => println!("{route}"),
        RouteDecision::Redirect { to, notice } => {
            if let Some(notice) = notice {
                println!("{}", notice.message());
            }
            println!("-> {to}");
        }
    }
}

/// Show the home sections.
///
/// # Errors
///
/// Returns an error without a session or if the catalog cannot be fetched.
#[allow(clippy::print_stdout)]
pub async fn home(market: &App, filter: CategoryFilter) -> Result<(), CliError> {
    enter(market, &Route::Home)?;
    let home = market.browse().home(filter).await?;

    let (trending, recent) = match filter {
        CategoryFilter::All => ("Trending Now".to_string(), "Recent Listings".to_string()),
        CategoryFilter::Only(category) => (format!("{category} Trending"), format!("{category} Listings")),
    };

    println!("{trending}");
    for product in &home.trending {
        println!("  {}", product_line(product));
    }
    println!();
    println!("{recent}");
    for product in &home.recent {
        println!("  {}", product_line(product));
    }
    Ok(())
}

/// Show a product.
///
/// # Errors
///
/// Returns an error without a session or for an unknown product.
#[allow(clippy::print_stdout)]
pub async fn product(market: &App, id: ProductId) -> Result<(), CliError> {
    enter(market, &Route::Product(id))?;
    let product = market.browse().product(id).await?;

    println!("{}", product.title);
    println!("  {} · {} · {}", product.price, product.condition, product.category);
    println!("  {}", product.location);
    if let Some(time_ago) = product.time_ago.as_deref() {
        println!("  Listed {time_ago}");
    }
    println!();
    println!("{}", product.description);
    if let Some(seller) = product.seller.as_ref() {
        println!();
        println!("Seller: {} (campus chat {} {})", seller.name, seller.id, product.id);
    }
    if market.favorites().is_favorite(id) {
        println!("♥ In your favorites");
    }
    Ok(())
}

/// Toggle a product in or out of favorites.
///
/// # Errors
///
/// Returns an error without a session or for an unknown product.
pub async fn favorite(market: &mut App, id: ProductId) -> Result<(), CliError> {
    let now_favorite = market.toggle_favorite(id).await?;

    #[allow(clippy::print_stdout)]
    {
        if now_favorite {
            println!("Added to favorites ({} total)", market.favorites().count());
        } else {
            println!("Removed from favorites ({} total)", market.favorites().count());
        }
    }
    Ok(())
}

/// List favorites.
///
/// # Errors
///
/// Returns an error without a session.
#[allow(clippy::print_stdout)]
pub fn favorites(market: &App, order: SortOrder) -> Result<(), CliError> {
    enter(market, &Route::Favorites)?;
    let favorites = market.sorted_favorites(order)?;
    if favorites.is_empty() {
        println!("No favorites yet");
        return Ok(());
    }

    println!("Favorites ({}), {}", favorites.len(), order.label());
    for item in favorites {
        println!("  [{}] {} - {}", item.id, item.title, item.price);
    }
    Ok(())
}

/// Show the signed-in user's profile and listings.
///
/// # Errors
///
/// Returns an error without a session.
#[allow(clippy::print_stdout)]
pub fn profile(market: &App) -> Result<(), CliError> {
    enter(market, &Route::Profile)?;
    let view = market.profile()?;

    println!("{} <{}>", view.user.name, view.user.email);
    if let Some(profile) = view.profile.as_ref() {
        println!("  {} · {} · {}", profile.university, profile.program, profile.year);
        println!("  Member since {}", profile.member_since);
    }
    if let Some(bio) = view.user.bio.as_deref() {
        println!("  {bio}");
    }

    println!();
    println!("Listings ({})", view.listings.len());
    for product in &view.listings {
        println!("  {}", product_line(product));
    }
    Ok(())
}

/// Show a seller profile.
///
/// # Errors
///
/// Returns an error without a session or for an unknown seller.
#[allow(clippy::print_stdout)]
pub async fn seller(market: &App, id: UserId) -> Result<(), CliError> {
    enter(market, &Route::Seller(id))?;
    let page = market.browse().seller(id).await?;
    let seller = &page.seller;

    let verified = if seller.verified { " ✓" } else { "" };
    println!("{}{verified}", seller.name);
    println!("  ★ {:.1} · {} · Member since {}", seller.rating, seller.location, seller.member_since);
    println!("  Responds {} ({})", seller.response_time, seller.response_rate);
    println!();
    println!("{}", seller.bio);

    println!();
    println!("Listings ({})", page.products.len());
    for product in &page.products {
        println!("  {}", product_line(product));
    }

    println!();
    println!("Reviews ({})", seller.reviews.len());
    for review in &seller.reviews {
        println!("  {} ★{} {} - {}", review.reviewer, review.rating, review.comment, review.date);
    }
    Ok(())
}

/// Show notifications.
///
/// # Errors
///
/// Returns an error without a session.
#[allow(clippy::print_stdout)]
pub async fn notifications(market: &App) -> Result<(), CliError> {
    enter(market, &Route::Notifications)?;
    let feed = market.notifications().await?;

    println!("Notifications ({} unread)", feed.unread);
    for item in &feed.items {
        let marker = if item.read { " " } else { "•" };
        println!("{marker} {} - {} ({})", item.title, item.message, item.time);
    }
    Ok(())
}
