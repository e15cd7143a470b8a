//! Authentication error types.

use std::fmt;

use thiserror::Error;

use campus_market_core::{EmailError, Role};

use crate::storage::StorageError;

/// The email's domain does not match the selected account type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct DomainMismatch {
    /// Account type that was selected.
    pub role: Role,
    /// Domain that account type requires.
    pub domain: String,
}

impl fmt::Display for DomainMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.role {
            Role::Student => "Student",
            Role::Admin => "Admin",
        };
        write!(f, "{label} accounts must use @{} email", self.domain)
    }
}

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Email domain does not match the selected role.
    #[error(transparent)]
    DomainMismatch(#[from] DomainMismatch),

    /// Password too short.
    #[error("Password must be at least {min} characters")]
    WeakPassword { min: usize },

    /// Password and confirmation differ.
    #[error("Passwords do not match")]
    PasswordMismatch,

    /// Sign-up without a display name.
    #[error("Name is required")]
    MissingName,

    /// Operation needs a signed-in user.
    #[error("not signed in")]
    NotSignedIn,

    /// Session or profile could not be written.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl AuthError {
    /// Message suitable for showing next to the sign-in form.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidEmail(_) => "Please enter a valid email address".to_string(),
            Self::NotSignedIn => "Please sign in to continue".to_string(),
            Self::Storage(_) => "Something went wrong. Please try again.".to_string(),
            other => other.to_string(),
        }
    }
}
