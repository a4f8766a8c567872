//! External movie metadata lookups.

pub mod tmdb;

pub use crate::error::ProviderError;
pub use tmdb::{MetadataMovie, MetadataMovieDetails, TmdbProvider};
