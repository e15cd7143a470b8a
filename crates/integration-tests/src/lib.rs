//! Integration tests for the StudentNest campus marketplace.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p campus-market-integration-tests
//! ```
//!
//! Every test drives a [`TestMarket`]: a full [`Marketplace`] over a
//! [`FileStore`] in a temporary directory, with a zero-latency backend.
//! [`TestMarket::reopen`] drops the in-memory state and loads it again from
//! disk, the way a page reload would.
//!
//! # Test Categories
//!
//! - `session` - sign-in, sign-up, sign-out and role derivation
//! - `favorites` - favorites set behaviour and persistence
//! - `listings` - sell form validation, catalog and admin moderation
//! - `chat` - chat transcripts

use std::path::Path;
use std::sync::Arc;

use secrecy::SecretString;
use tempfile::TempDir;

use campus_market::backend::MockBackend;
use campus_market::config::BackendConfig;
use campus_market::models::ListingForm;
use campus_market::services::auth::{AuthError, AuthOutcome, SignInForm, SignUpForm};
use campus_market::storage::{FileStore, StorageError};
use campus_market::{MarketConfig, Marketplace};
use campus_market_core::Role;

/// A marketplace over a throwaway data directory.
pub struct TestMarket {
    dir: TempDir,
    pub market: Marketplace<MockBackend>,
}

impl TestMarket {
    /// Create a marketplace over a fresh temporary directory.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the directory cannot be created.
    pub fn new() -> Result<Self, StorageError> {
        let dir = TempDir::new()?;
        let market = open(dir.path())?;
        Ok(Self { dir, market })
    }

    /// Drop in-memory state and load the marketplace again from disk.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the directory cannot be reopened.
    pub fn reopen(self) -> Result<Self, StorageError> {
        let Self { dir, market } = self;
        drop(market);
        let market = open(dir.path())?;
        Ok(Self { dir, market })
    }

    /// Data directory.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Sign in through the auth service.
    ///
    /// # Errors
    ///
    /// Returns `AuthError` if sign-in is rejected.
    pub fn sign_in(&mut self, email: &str, password: &str, role: Role) -> Result<AuthOutcome, AuthError> {
        self.market.auth().sign_in(&SignInForm {
            email: email.to_string(),
            password: SecretString::from(password.to_string()),
            role,
        })
    }

    /// Sign up through the auth service, confirming the password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError` if sign-up is rejected.
    pub fn sign_up(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
        role: Role,
    ) -> Result<AuthOutcome, AuthError> {
        self.market.auth().sign_up(&SignUpForm {
            name: name.to_string(),
            email: email.to_string(),
            password: SecretString::from(password.to_string()),
            password_confirm: SecretString::from(password.to_string()),
            role,
        })
    }
}

fn open(dir: &Path) -> Result<Marketplace<MockBackend>, StorageError> {
    let config = MarketConfig {
        data_dir: dir.to_path_buf(),
        backend: BackendConfig::instant(),
        ..MarketConfig::default()
    };
    let store = FileStore::open(dir)?;
    let backend = MockBackend::new(config.backend.clone());
    Ok(Marketplace::open(config, Arc::new(store), backend))
}

/// A sell form with every field filled in and a price of 19.99.
#[must_use]
pub fn complete_form() -> ListingForm {
    ListingForm {
        title: "Graphing Calculator TI-84".to_string(),
        description: "Works perfectly, batteries included".to_string(),
        price: "19.99".to_string(),
        category: "Electronics".to_string(),
        condition: "Good".to_string(),
        location: "Library".to_string(),
        images: vec!["calculator.jpg".to_string()],
    }
}
