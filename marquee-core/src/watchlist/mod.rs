//! The watchlist ordering engine and its playback dispatcher.
//!
//! [`Watchlist`] is the pure data structure holding the ordered entries and
//! the cursor. [`WatchlistService`] owns one behind an async `RwLock` and
//! resolves entries against a [`CatalogPort`](crate::catalog::CatalogPort).
//! Playback operations live in `playback.rs` as further methods on the
//! service.

mod playback;
mod queue;
mod service;

pub use queue::{Watchlist, WatchlistEntry};
pub use service::{Removal, WatchlistService};
