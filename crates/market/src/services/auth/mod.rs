//! Authentication service.
//!
//! Sign-in never checks a stored credential: an account is "valid" when its
//! email domain matches the selected account type and the password is long
//! enough. The role therefore always follows from the email domain.

mod error;

pub use error::{AuthError, DomainMismatch};

use chrono::Utc;
use secrecy::{ExposeSecret, SecretString};
use tracing::instrument;

use campus_market_core::{Email, Role, UserId};

use crate::config::AuthConfig;
use crate::db::{ProfileStore, SessionStore};
use crate::models::{SessionUser, UserProfile};
use crate::routes::Route;

/// Minimum password length.
pub const MIN_PASSWORD_LENGTH: usize = 6;

const STUDENT_UNIVERSITY: &str = "KG College";
const ADMIN_UNIVERSITY: &str = "KG Institute of Technology";
const DEFAULT_PROGRAM: &str = "Computer Science";
const DEFAULT_YEAR: &str = "Junior";

/// Check that `email` belongs to the domain of the `selected` account type.
///
/// # Errors
///
/// Returns `DomainMismatch` naming the required domain otherwise.
pub fn derive_role(rules: &AuthConfig, email: &Email, selected: Role) -> Result<Role, DomainMismatch> {
    let domain = match selected {
        Role::Student => &rules.student_domain,
        Role::Admin => &rules.admin_domain,
    };

    if email.has_domain(domain) {
        Ok(selected)
    } else {
        Err(DomainMismatch {
            role: selected,
            domain: domain.clone(),
        })
    }
}

/// Sign-in form input.
#[derive(Debug)]
pub struct SignInForm {
    pub email: String,
    pub password: SecretString,
    /// Selected account tab.
    pub role: Role,
}

/// Sign-up form input.
#[derive(Debug)]
pub struct SignUpForm {
    pub name: String,
    pub email: String,
    pub password: SecretString,
    pub password_confirm: SecretString,
    /// Selected account tab.
    pub role: Role,
}

/// Result of a successful sign-in or sign-up.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthOutcome {
    pub user: SessionUser,
    /// Where to navigate next.
    pub redirect: Route,
}

/// Authentication service.
///
/// Drives the session state machine: `Anonymous` moves to an authenticated
/// state on success and stays put on any failure, with nothing written.
pub struct AuthService<'a> {
    rules: &'a AuthConfig,
    sessions: &'a mut SessionStore,
    profiles: &'a ProfileStore,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    pub const fn new(
        rules: &'a AuthConfig,
        sessions: &'a mut SessionStore,
        profiles: &'a ProfileStore,
    ) -> Self {
        Self {
            rules,
            sessions,
            profiles,
        }
    }

    /// Sign in with an email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email cannot be parsed.
    /// Returns `AuthError::DomainMismatch` if the domain does not fit the tab.
    /// Returns `AuthError::WeakPassword` if the password is too short.
    /// Returns `AuthError::Storage` if the session cannot be saved.
    #[instrument(skip(self, form), fields(role = %form.role))]
    pub fn sign_in(&mut self, form: &SignInForm) -> Result<AuthOutcome, AuthError> {
        let (email, role) = self.check_credentials(&form.email, form.role, &form.password)?;

        let profile = self.profiles.get(&email);
        let user = SessionUser {
            id: profile.as_ref().map_or_else(mint_user_id, |p| p.id),
            name: display_name(&email),
            bio: profile.map(|p| p.bio).filter(|bio| !bio.is_empty()),
            university: None,
            program: None,
            year: None,
            member_since: None,
            email,
            role,
            is_authenticated: true,
        };

        self.sessions.save(user.clone())?;
        tracing::info!(user_id = %user.id, %role, "signed in");

        Ok(AuthOutcome {
            redirect: Route::landing_for(role),
            user,
        })
    }

    /// Create an account and sign in.
    ///
    /// Writes the session record and a fresh profile record.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingName` if no display name was given.
    /// Returns `AuthError::PasswordMismatch` if the confirmation differs.
    /// Returns the same errors as [`Self::sign_in`] otherwise.
    #[instrument(skip(self, form), fields(role = %form.role))]
    pub fn sign_up(&mut self, form: &SignUpForm) -> Result<AuthOutcome, AuthError> {
        let name = form.name.trim();
        if name.is_empty() {
            return Err(AuthError::MissingName);
        }

        let (email, role) = self.check_credentials(&form.email, form.role, &form.password)?;

        if form.password.expose_secret() != form.password_confirm.expose_secret() {
            return Err(AuthError::PasswordMismatch);
        }

        let university = match role {
            Role::Student => STUDENT_UNIVERSITY,
            Role::Admin => ADMIN_UNIVERSITY,
        };
        let member_since = Utc::now().format("%B %Y").to_string();

        let profile = UserProfile {
            id: mint_user_id(),
            name: name.to_owned(),
            email: email.clone(),
            avatar: None,
            university: university.to_string(),
            program: DEFAULT_PROGRAM.to_string(),
            year: DEFAULT_YEAR.to_string(),
            member_since: member_since.clone(),
            bio: String::new(),
            listings_count: 0,
            sold_count: 0,
            bought_count: 0,
            favorite_count: 0,
            rating: 4.8,
            response_rate: "95%".to_string(),
            response_time: "Under 1 hour".to_string(),
            verified: true,
        };

        let user = SessionUser {
            id: profile.id,
            name: profile.name.clone(),
            email,
            role,
            is_authenticated: true,
            bio: None,
            university: Some(profile.university.clone()),
            program: Some(profile.program.clone()),
            year: Some(profile.year.clone()),
            member_since: Some(member_since),
        };

        self.profiles.save(&profile)?;
        self.sessions.save(user.clone())?;
        tracing::info!(user_id = %user.id, %role, "account created");

        Ok(AuthOutcome {
            redirect: Route::landing_for(role),
            user,
        })
    }

    /// Sign out. Always ends anonymous, even if the record cannot be removed.
    #[instrument(skip(self))]
    pub fn sign_out(&mut self) -> Route {
        if let Err(e) = self.sessions.clear() {
            tracing::warn!(error = %e, "failed to remove session record");
        }
        tracing::info!("signed out");
        Route::SignIn
    }

    /// Replace the signed-in user's bio in both the session and profile.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotSignedIn` without a session.
    /// Returns `AuthError::Storage` if a record cannot be saved.
    #[instrument(skip(self, bio))]
    pub fn update_bio(&mut self, bio: &str) -> Result<SessionUser, AuthError> {
        let mut user = self.sessions.current().cloned().ok_or(AuthError::NotSignedIn)?;
        let bio = bio.trim().to_owned();

        if let Some(mut profile) = self.profiles.get(&user.email) {
            profile.bio.clone_from(&bio);
            self.profiles.save(&profile)?;
        }

        user.bio = Some(bio);
        self.sessions.save(user.clone())?;
        tracing::debug!(user_id = %user.id, "bio updated");
        Ok(user)
    }

    fn check_credentials(
        &self,
        email: &str,
        selected: Role,
        password: &SecretString,
    ) -> Result<(Email, Role), AuthError> {
        let email = Email::parse(email)?;
        let role = derive_role(self.rules, &email, selected)?;

        if password.expose_secret().chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AuthError::WeakPassword {
                min: MIN_PASSWORD_LENGTH,
            });
        }

        Ok((email, role))
    }
}

/// Display name taken from the email: local part with its first letter capitalized.
fn display_name(email: &Email) -> String {
    let local = email.local_part();
    let mut chars = local.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

fn mint_user_id() -> UserId {
    UserId::new(Utc::now().timestamp_millis())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::models::SessionState;
    use crate::storage::{KeyValueStore, MemoryStore, keys};

    struct Fixture {
        rules: AuthConfig,
        store: Arc<dyn KeyValueStore>,
        sessions: SessionStore,
        profiles: ProfileStore,
    }

    impl Fixture {
        fn new() -> Self {
            let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
            Self {
                rules: AuthConfig::default(),
                sessions: SessionStore::load(Arc::clone(&store)),
                profiles: ProfileStore::new(Arc::clone(&store)),
                store,
            }
        }

        fn auth(&mut self) -> AuthService<'_> {
            AuthService::new(&self.rules, &mut self.sessions, &self.profiles)
        }
    }

    fn sign_in_form(email: &str, password: &str, role: Role) -> SignInForm {
        SignInForm {
            email: email.to_string(),
            password: SecretString::from(password.to_string()),
            role,
        }
    }

    fn sign_up_form(email: &str, password: &str, confirm: &str, role: Role) -> SignUpForm {
        SignUpForm {
            name: "Jane Doe".to_string(),
            email: email.to_string(),
            password: SecretString::from(password.to_string()),
            password_confirm: SecretString::from(confirm.to_string()),
            role,
        }
    }

    #[test]
    fn test_derive_role() {
        let rules = AuthConfig::default();
        let student = Email::parse("jane@kgkite.ac.in").unwrap();
        let admin = Email::parse("root@kgisl.ac.in").unwrap();

        assert_eq!(derive_role(&rules, &student, Role::Student), Ok(Role::Student));
        assert_eq!(derive_role(&rules, &admin, Role::Admin), Ok(Role::Admin));
        assert_eq!(
            derive_role(&rules, &student, Role::Admin).unwrap_err().to_string(),
            "Admin accounts must use @kgisl.ac.in email"
        );
        assert!(derive_role(&rules, &admin, Role::Student).is_err());
    }

    #[test]
    fn test_derive_role_rejects_lookalike_domains() {
        let rules = AuthConfig::default();
        let email = Email::parse("jane@notkgkite.ac.in").unwrap();
        assert!(derive_role(&rules, &email, Role::Student).is_err());
    }

    #[test]
    fn test_derive_role_domain_is_case_sensitive() {
        let rules = AuthConfig::default();
        let email = Email::parse("root@KGISL.ac.in").unwrap();
        assert!(derive_role(&rules, &email, Role::Admin).is_err());
    }

    #[test]
    fn test_sign_in_student() {
        let mut fx = Fixture::new();
        let outcome = fx
            .auth()
            .sign_in(&sign_in_form("jane@kgkite.ac.in", "abcdef", Role::Student))
            .unwrap();

        assert_eq!(outcome.redirect, Route::Home);
        assert_eq!(outcome.user.name, "Jane");
        assert_eq!(outcome.user.role, Role::Student);
        assert_eq!(fx.sessions.state(), SessionState::AuthenticatedStudent);
    }

    #[test]
    fn test_sign_in_admin_redirects_to_dashboard() {
        let mut fx = Fixture::new();
        let outcome = fx
            .auth()
            .sign_in(&sign_in_form("ops@kgisl.ac.in", "secret1", Role::Admin))
            .unwrap();

        assert_eq!(outcome.redirect, Route::Admin);
        assert_eq!(fx.sessions.state(), SessionState::AuthenticatedAdmin);
    }

    #[test]
    fn test_failed_sign_in_writes_nothing() {
        let mut fx = Fixture::new();

        let err = fx
            .auth()
            .sign_in(&sign_in_form("jane@kgkite.ac.in", "abcdef", Role::Admin))
            .unwrap_err();
        assert!(matches!(err, AuthError::DomainMismatch(_)));

        let err = fx
            .auth()
            .sign_in(&sign_in_form("jane@kgkite.ac.in", "abc", Role::Student))
            .unwrap_err();
        assert_eq!(err.to_string(), "Password must be at least 6 characters");

        let err = fx
            .auth()
            .sign_in(&sign_in_form("jane.kgkite.ac.in", "abcdef", Role::Student))
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidEmail(_)));

        assert_eq!(fx.sessions.state(), SessionState::Anonymous);
        assert_eq!(fx.store.get(keys::USER).unwrap(), None);
    }

    #[test]
    fn test_sign_up_writes_session_and_profile() {
        let mut fx = Fixture::new();
        let outcome = fx
            .auth()
            .sign_up(&sign_up_form("jane@kgkite.ac.in", "abcdef", "abcdef", Role::Student))
            .unwrap();

        assert_eq!(outcome.redirect, Route::Home);
        assert_eq!(outcome.user.name, "Jane Doe");

        let email = Email::parse("jane@kgkite.ac.in").unwrap();
        let profile = fx.profiles.get(&email).unwrap();
        assert_eq!(profile.id, outcome.user.id);
        assert_eq!(profile.university, "KG College");
        assert!(profile.verified);
    }

    #[test]
    fn test_sign_up_on_wrong_tab_creates_nothing() {
        let mut fx = Fixture::new();
        let err = fx
            .auth()
            .sign_up(&sign_up_form("jane@kgkite.ac.in", "abcdef", "abcdef", Role::Admin))
            .unwrap_err();

        assert!(matches!(err, AuthError::DomainMismatch(_)));
        assert!(fx.sessions.current().is_none());
        assert!(fx.profiles.get(&Email::parse("jane@kgkite.ac.in").unwrap()).is_none());
    }

    #[test]
    fn test_sign_up_password_mismatch() {
        let mut fx = Fixture::new();
        let err = fx
            .auth()
            .sign_up(&sign_up_form("jane@kgkite.ac.in", "abcdef", "abcdeg", Role::Student))
            .unwrap_err();
        assert_eq!(err.user_message(), "Passwords do not match");
    }

    #[test]
    fn test_sign_up_requires_name() {
        let mut fx = Fixture::new();
        let mut form = sign_up_form("jane@kgkite.ac.in", "abcdef", "abcdef", Role::Student);
        form.name = "   ".to_string();
        assert!(matches!(fx.auth().sign_up(&form), Err(AuthError::MissingName)));
    }

    #[test]
    fn test_sign_in_reuses_profile_identity() {
        let mut fx = Fixture::new();
        let created = fx
            .auth()
            .sign_up(&sign_up_form("jane@kgkite.ac.in", "abcdef", "abcdef", Role::Student))
            .unwrap();
        fx.auth().update_bio("Selling my old textbooks").unwrap();
        fx.auth().sign_out();

        let again = fx
            .auth()
            .sign_in(&sign_in_form("jane@kgkite.ac.in", "abcdef", Role::Student))
            .unwrap();
        assert_eq!(again.user.id, created.user.id);
        assert_eq!(again.user.bio.as_deref(), Some("Selling my old textbooks"));
    }

    #[test]
    fn test_sign_out_clears_session() {
        let mut fx = Fixture::new();
        fx.auth()
            .sign_in(&sign_in_form("jane@kgkite.ac.in", "abcdef", Role::Student))
            .unwrap();

        assert_eq!(fx.auth().sign_out(), Route::SignIn);
        assert_eq!(fx.sessions.state(), SessionState::Anonymous);
        assert_eq!(fx.store.get(keys::USER).unwrap(), None);
    }

    #[test]
    fn test_update_bio_requires_session() {
        let mut fx = Fixture::new();
        assert!(matches!(fx.auth().update_bio("hi"), Err(AuthError::NotSignedIn)));
    }

    #[test]
    fn test_update_bio_writes_profile() {
        let mut fx = Fixture::new();
        fx.auth()
            .sign_up(&sign_up_form("jane@kgkite.ac.in", "abcdef", "abcdef", Role::Student))
            .unwrap();

        let user = fx.auth().update_bio("  CS junior  ").unwrap();
        assert_eq!(user.bio.as_deref(), Some("CS junior"));

        let profile = fx.profiles.get(&user.email).unwrap();
        assert_eq!(profile.bio, "CS junior");
        assert_eq!(fx.sessions.current().unwrap().bio.as_deref(), Some("CS junior"));
    }

    #[test]
    fn test_display_name() {
        let email = Email::parse("jane.doe@kgkite.ac.in").unwrap();
        assert_eq!(display_name(&email), "Jane.doe");
    }
}
