//! # Marquee Core
//!
//! Business logic for the Marquee movie catalog: the catalog store ports and
//! their backends, the watchlist ordering engine with its playback cursor,
//! user accounts, and the external metadata provider.
//!
//! ## Architecture
//!
//! - [`catalog`]: the catalog store interface and its in-memory and
//!   PostgreSQL implementations
//! - [`watchlist`]: the ordered watchlist, cursor tracking and playback
//! - [`users`]: account creation and Argon2id password verification
//! - [`providers`]: TMDB lookups by director, title or id
//! - [`api`]: route constants and request/response payloads shared with the
//!   HTTP layer

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod api;
pub mod catalog;
pub mod error;
pub mod providers;
pub mod users;
pub mod watchlist;

pub use marquee_model as model;

#[cfg(feature = "database")]
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

pub use error::{CatalogError, ProviderError, UserError, WatchlistError};
