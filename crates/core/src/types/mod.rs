//! Core types for the campus marketplace.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod listing;
pub mod price;
pub mod role;

pub use email::{Email, EmailError};
pub use id::*;
pub use listing::{Category, Condition, UnknownLabel};
pub use price::{Price, PriceError};
pub use role::Role;
