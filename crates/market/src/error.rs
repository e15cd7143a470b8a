//! Unified error handling.
//!
//! Every marketplace operation returns `Result<T, MarketError>`. The
//! [`MarketError::user_message`] text is what a view shows; storage and
//! backend details only reach the logs.

use thiserror::Error;

use crate::backend::BackendError;
use crate::middleware::AuthRejection;
use crate::services::auth::AuthError;
use crate::services::listing::ValidationErrors;
use crate::storage::StorageError;

/// Marketplace-level error type.
#[derive(Debug, Error)]
pub enum MarketError {
    /// Sign-in, sign-up or profile operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Sell form failed validation.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// Device storage operation failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Backend operation failed.
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    /// Session does not allow the operation.
    #[error("Rejected: {0}")]
    Rejected(#[from] AuthRejection),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Chat message was blank.
    #[error("Message cannot be empty")]
    EmptyMessage,
}

impl MarketError {
    /// Message safe to show to the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Auth(err) => err.user_message(),
            Self::Validation(errors) => match errors.len() {
                1 => errors
                    .iter()
                    .next()
                    .map_or_else(String::new, |(_, message)| message.to_owned()),
                n => format!("Please fix the {n} highlighted fields"),
            },
            Self::Storage(_) => "Something went wrong. Please try again.".to_string(),
            Self::Backend(_) => "The marketplace is unavailable right now".to_string(),
            Self::Rejected(AuthRejection::SignInRequired) => "Please sign in to continue".to_string(),
            Self::Rejected(AuthRejection::AccessDenied) => {
                "Access denied: admin privileges required".to_string()
            }
            Self::NotFound(what) => format!("{what} not found"),
            Self::EmptyMessage => self.to_string(),
        }
    }

    /// Log errors that are not the user's fault.
    pub fn log(&self) {
        if matches!(self, Self::Storage(_) | Self::Backend(_)) {
            tracing::error!(error = %self, "operation failed");
        } else {
            tracing::debug!(error = %self, "operation rejected");
        }
    }
}

/// Result type alias for `MarketError`.
pub type Result<T> = std::result::Result<T, MarketError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internal_details_are_hidden() {
        let err = MarketError::from(StorageError::Poisoned);
        assert_eq!(err.user_message(), "Something went wrong. Please try again.");

        let err = MarketError::from(BackendError::Unavailable("connection reset".to_string()));
        assert!(!err.user_message().contains("connection reset"));
    }

    #[test]
    fn test_rejections() {
        assert_eq!(
            MarketError::from(AuthRejection::SignInRequired).user_message(),
            "Please sign in to continue"
        );
        assert_eq!(
            MarketError::NotFound("Product 9".to_string()).user_message(),
            "Product 9 not found"
        );
    }
}
