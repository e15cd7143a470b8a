//! CLI command implementations.

pub mod account;
pub mod admin;
pub mod browse;
pub mod chat;
pub mod sell;

use thiserror::Error;

use campus_market::backend::MockBackend;
use campus_market::config::ConfigError;
use campus_market::middleware::RouteDecision;
use campus_market::models::Product;
use campus_market::routes::Route;
use campus_market::services::auth::AuthError;
use campus_market::storage::StorageError;
use campus_market::{MarketError, Marketplace};

/// Marketplace as the CLI runs it.
pub type App = Marketplace<MockBackend>;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Data directory could not be opened.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Marketplace operation failed.
    #[error("{0}")]
    Market(#[from] MarketError),

    /// The route guard sent the user elsewhere.
    #[error("Redirected to {0}")]
    Redirected(Route),
}

impl From<AuthError> for CliError {
    fn from(e: AuthError) -> Self {
        Self::Market(e.into())
    }
}

impl CliError {
    /// Message shown on stderr.
    pub fn user_message(&self) -> String {
        match self {
            Self::Market(e @ MarketError::Rejected(rejection)) => {
                format!("{} -> {}", e.user_message(), rejection.redirect())
            }
            Self::Market(e) => e.user_message(),
            Self::Redirected(Route::SignIn) => "Please sign in first: campus signin".to_string(),
            other => other.to_string(),
        }
    }
}

/// Run the route guard for `route`, failing when it redirects.
///
/// # Errors
///
/// Returns `CliError::Redirected` with the redirect target.
pub fn enter(market: &App, route: &Route) -> Result<(), CliError> {
    match market.navigate(&route.path()) {
        RouteDecision::Render(_) => Ok(()),
        RouteDecision::Redirect { to, notice } => {
            if let Some(notice) = notice {
                tracing::warn!(from = %route, to = %to, "{}", notice.message());
            }
            Err(CliError::Redirected(to))
        }
    }
}

/// One-line product summary.
fn product_line(product: &Product) -> String {
    let rating = product
        .rating
        .map_or_else(String::new, |rating| format!("  ★ {rating:.1}"));
    format!(
        "[{}] {} - {} ({}, {}){rating}",
        product.id, product.title, product.price, product.condition, product.location
    )
}

#[cfg(test)]
mod tests {
    use campus_market::middleware::AuthRejection;

    use super::*;

    #[test]
    fn test_rejection_message_names_redirect() {
        let signed_out = CliError::from(MarketError::Rejected(AuthRejection::SignInRequired));
        assert_eq!(signed_out.user_message(), "Please sign in to continue -> /signin");

        let student = CliError::from(MarketError::Rejected(AuthRejection::AccessDenied));
        assert_eq!(
            student.user_message(),
            "Access denied: admin privileges required -> /home"
        );
    }

    #[test]
    fn test_redirect_to_sign_in_suggests_command() {
        assert_eq!(
            CliError::Redirected(Route::SignIn).user_message(),
            "Please sign in first: campus signin"
        );
    }
}
