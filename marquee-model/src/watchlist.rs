use crate::ids::{CatalogId, FilmNumber};
use crate::movie::{CatalogEntry, CompoundKey};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Read-only view of one watchlist slot.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WatchlistItem {
    pub film_number: FilmNumber,
    pub catalog_id: CatalogId,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub key: CompoundKey,
    pub is_current: bool,
}

/// Number of queued films and their combined runtime in minutes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WatchlistSummary {
    pub length: usize,
    pub total_duration: i64,
}

/// Outcome of a bulk playback run.
///
/// `dangling` lists catalog ids that could not be resolved and were skipped.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlaybackReport {
    pub played: Vec<CatalogEntry>,
    pub dangling: Vec<CatalogId>,
}

impl PlaybackReport {
    pub fn is_complete(&self) -> bool {
        self.dangling.is_empty()
    }
}

/// The film under the cursor, resolved against the catalog.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CurrentFilm {
    pub film_number: FilmNumber,
    pub movie: CatalogEntry,
}
