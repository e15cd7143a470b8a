//! Campus Market Core - Shared types library.
//!
//! This crate provides common types used across all campus marketplace components:
//! - `campus-market` - Stores, services, route guard and mock backend
//! - `cli` - Command-line front end driving the marketplace
//!
//! # Architecture
//!
//! The core crate contains only types and parsing - no I/O, no storage access,
//! no async. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, roles and listing enums

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
