//! StudentNest campus marketplace library.
//!
//! Device-local state (session, favorites, listings, profiles, chat
//! transcripts) lives in a [`storage::KeyValueStore`]; the catalog comes from
//! a [`backend::MarketBackend`]. [`Marketplace`] wires the two together and
//! every navigation goes through [`middleware::guard`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod backend;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod storage;

pub use config::MarketConfig;
pub use error::{MarketError, Result};
pub use state::{Marketplace, ProfileView};
