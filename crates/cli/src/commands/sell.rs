//! Sell command.

use campus_market::MarketError;
use campus_market::models::ListingForm;
use campus_market::routes::Route;

use super::{App, CliError, enter};

/// Validate and submit a listing.
///
/// Every failing field is printed before the command fails.
///
/// # Errors
///
/// Returns an error without a session, for an invalid form, or if the
/// listing cannot be stored.
#[allow(clippy::print_stdout)]
pub fn submit(market: &mut App, form: ListingForm) -> Result<(), CliError> {
    enter(market, &Route::Sell)?;

    match market.sell().submit(&form) {
        Ok(outcome) => {
            println!("Listed \"{}\" for {}", outcome.listing.title, outcome.listing.price);
            println!("-> {}", outcome.redirect);
            Ok(())
        }
        Err(MarketError::Validation(errors)) => {
            for (field, message) in errors.iter() {
                println!("  {field}: {message}");
            }
            Err(MarketError::Validation(errors).into())
        }
        Err(e) => Err(e.into()),
    }
}
