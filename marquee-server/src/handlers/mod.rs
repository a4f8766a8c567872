//! HTTP request handlers organized by functionality

pub mod catalog;
pub mod metadata;
pub mod playback;
pub mod system;
pub mod users;
pub mod watchlist;
