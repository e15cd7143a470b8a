//! Admin dashboard commands.
//!
//! # Usage
//!
//! ```bash
//! campus signin -e ops@kgisl.ac.in -p secret1 -r admin
//! campus admin stats
//! campus admin listings
//! campus admin delete 1718451000123
//! ```

use campus_market::routes::Route;
use campus_market_core::ProductId;

use super::{App, CliError, enter};

/// Show listing counts and the recent activity feed.
///
/// # Errors
///
/// Returns an error unless an admin is signed in.
#[allow(clippy::print_stdout)]
pub async fn stats(market: &mut App) -> Result<(), CliError> {
    enter(market, &Route::Admin)?;
    let stats = market.admin().stats().await?;

    println!("Total listings:  {}", stats.total_listings);
    println!("Active listings: {}", stats.active_listings);
    println!();
    println!("Recent activity");
    for entry in &stats.recent_activity {
        println!("  {} - {} by {} ({})", entry.action, entry.item, entry.user, entry.time);
    }
    Ok(())
}

/// List submitted listings.
///
/// # Errors
///
/// Returns an error unless an admin is signed in.
#[allow(clippy::print_stdout)]
pub fn listings(market: &mut App) -> Result<(), CliError> {
    enter(market, &Route::Admin)?;
    let admin = market.admin();
    let listings = admin.listings()?;

    if listings.is_empty() {
        println!("No listings");
    }
    for listing in listings {
        println!(
            "  [{}] {} - {} by {} ({})",
            listing.id,
            listing.title,
            listing.price,
            listing.seller.name,
            listing.created_at.format("%Y-%m-%d")
        );
    }
    Ok(())
}

/// Delete a submitted listing.
///
/// # Errors
///
/// Returns an error unless an admin is signed in, or for an unknown id.
pub fn delete(market: &mut App, id: ProductId) -> Result<(), CliError> {
    enter(market, &Route::Admin)?;
    let removed = market.admin().delete_listing(id)?;

    #[allow(clippy::print_stdout)]
    {
        println!("Deleted \"{}\"", removed.title);
    }
    Ok(())
}
