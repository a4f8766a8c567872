//! Core data model definitions shared across Marquee crates.

pub mod error;
pub mod ids;
pub mod movie;
pub mod watchlist;

// Intentionally curated re-exports for downstream consumers.
pub use error::{ModelError, Result as ModelResult};
pub use ids::{CatalogId, FilmNumber};
pub use movie::{CatalogEntry, CatalogSort, CompoundKey, NewCatalogEntry};
pub use watchlist::{
    CurrentFilm, PlaybackReport, WatchlistItem, WatchlistSummary,
};
