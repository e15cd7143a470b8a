//! Navigation middleware.
//!
//! Every navigation passes through [`guard`] before a view is built.

pub mod auth;

pub use auth::{AuthRejection, GuardNotice, RouteDecision, guard, require_admin, require_auth};
