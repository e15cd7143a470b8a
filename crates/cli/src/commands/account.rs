//! Account commands.
//!
//! # Usage
//!
//! ```bash
//! campus signup -n "Jane Doe" -e jane@kgkite.ac.in -p abcdef -c abcdef
//! campus signin -e ops@kgisl.ac.in -p secret1 -r admin
//! campus bio "CS junior selling old textbooks"
//! campus signout
//! ```

use secrecy::SecretString;

use campus_market::services::auth::{AuthOutcome, SignInForm, SignUpForm};
use campus_market_core::Role;

use super::{App, CliError};

/// Sign in to an account.
///
/// # Errors
///
/// Returns an error if the email, domain or password is rejected.
pub fn sign_in(
    market: &mut App,
    email: String,
    password: SecretString,
    role: Role,
) -> Result<(), CliError> {
    let outcome = market.auth().sign_in(&SignInForm {
        email,
        password,
        role,
    })?;
    print_outcome("Signed in", &outcome);
    Ok(())
}

/// Create an account and sign in.
///
/// # Errors
///
/// Returns an error if any sign-up check fails.
pub fn sign_up(
    market: &mut App,
    name: String,
    email: String,
    password: SecretString,
    password_confirm: SecretString,
    role: Role,
) -> Result<(), CliError> {
    let outcome = market.auth().sign_up(&SignUpForm {
        name,
        email,
        password,
        password_confirm,
        role,
    })?;
    print_outcome("Account created", &outcome);
    Ok(())
}

/// Sign out.
pub fn sign_out(market: &mut App) {
    let redirect = market.auth().sign_out();

    #[allow(clippy::print_stdout)]
    {
        println!("Signed out");
        println!("-> {redirect}");
    }
}

/// Show the signed-in user.
#[allow(clippy::print_stdout)]
pub fn whoami(market: &App) {
    match market.current_user() {
        Some(user) => {
            println!("{} <{}> ({})", user.name, user.email, user.role);
            if let Some(bio) = user.bio.as_deref() {
                println!("{bio}");
            }
        }
        None => println!("Not signed in"),
    }
}

/// Update the signed-in user's bio.
///
/// # Errors
///
/// Returns an error without a session or if the records cannot be saved.
pub fn bio(market: &mut App, text: &str) -> Result<(), CliError> {
    let user = market.auth().update_bio(text)?;

    #[allow(clippy::print_stdout)]
    {
        println!("Bio updated for {}", user.name);
    }
    Ok(())
}

fn print_outcome(action: &str, outcome: &AuthOutcome) {
    #[allow(clippy::print_stdout)]
    {
        println!(
            "{action}: {} <{}> ({})",
            outcome.user.name, outcome.user.email, outcome.user.role
        );
        println!("-> {}", outcome.redirect);
    }
}
