//! Business logic services.
//!
//! Services borrow the repositories they need for the length of one
//! operation; [`crate::Marketplace`] hands them out.

pub mod admin;
pub mod auth;
pub mod browse;
pub mod chat;
pub mod listing;
pub mod notifications;
