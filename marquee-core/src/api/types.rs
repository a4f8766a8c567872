use marquee_model::{
    CatalogEntry, CatalogId, CatalogSort, CompoundKey, CurrentFilm,
    FilmNumber, ModelError, NewCatalogEntry, PlaybackReport, WatchlistItem,
    WatchlistSummary,
};
use serde::{Deserialize, Serialize};

use crate::providers::{MetadataMovie, MetadataMovieDetails};

/// Success envelope: `{"status": "success", ...payload}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub message: Option<String>,
    #[serde(flatten)]
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: "success".to_string(),
            message: None,
            data,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl ApiResponse<Empty> {
    pub fn ok(message: impl Into<String>) -> Self {
        Self::success(Empty {}).with_message(message)
    }
}

/// Error body: `{"error": "<message>"}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Payload for responses that carry only the status and a message.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Empty {}

// --- requests ---------------------------------------------------------------

/// `(director, title, year)` as sent by clients, either as a JSON body or as
/// query parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompoundKeyRequest {
    pub director: String,
    pub title: String,
    pub year: i32,
}

impl CompoundKeyRequest {
    pub fn new(
        director: impl Into<String>,
        title: impl Into<String>,
        year: i32,
    ) -> Self {
        Self {
            director: director.into(),
            title: title.into(),
            year,
        }
    }

    pub fn into_key(self) -> Result<CompoundKey, ModelError> {
        CompoundKey::new(self.director, self.title, self.year)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveToFilmNumberRequest {
    #[serde(flatten)]
    pub movie: CompoundKeyRequest,
    pub film_number: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwapRequest {
    pub film_number_1: usize,
    pub film_number_2: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialsRequest {
    pub username: String,
    pub password: String,
}

pub type CreateMovieRequest = NewCatalogEntry;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct CatalogListQuery {
    #[serde(default)]
    pub sort_by_rating: Option<bool>,
    #[serde(default)]
    pub sort_by_watch_count: Option<bool>,
}

impl CatalogListQuery {
    pub fn sort(&self) -> CatalogSort {
        CatalogSort {
            by_rating: self.sort_by_rating.unwrap_or(false),
            by_watch_count: self.sort_by_watch_count.unwrap_or(false),
        }
    }

    /// Leaderboard ordering: watch count unless the caller says otherwise.
    pub fn leaderboard_sort(&self) -> CatalogSort {
        CatalogSort {
            by_rating: self.sort_by_rating.unwrap_or(false),
            by_watch_count: self.sort_by_watch_count.unwrap_or(true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectorQuery {
    pub director: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TitleQuery {
    pub title: String,
}

// --- responses --------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthBody {
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DbCheckBody {
    pub database_status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserBody {
    pub id: i64,
    pub username: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieBody {
    pub movie: CatalogEntry,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoviesBody {
    pub movies: Vec<CatalogEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletedBody {
    pub id: CatalogId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchlistItemBody {
    pub movie: WatchlistItem,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchlistBody {
    pub watchlist: Vec<WatchlistItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentFilmBody {
    pub current: CurrentFilm,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryBody {
    #[serde(flatten)]
    pub summary: WatchlistSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilmNumberBody {
    pub film_number: FilmNumber,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClearedBody {
    pub removed: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackBody {
    #[serde(flatten)]
    pub report: PlaybackReport,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetadataMoviesBody {
    pub movies: Vec<MetadataMovie>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetadataMovieBody {
    pub movie: MetadataMovieDetails,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn success_envelope_flattens_payload() {
        let body = ApiResponse::success(FilmNumberBody {
            film_number: FilmNumber::from_index(1),
        });
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"status": "success", "film_number": 2})
        );
    }

    #[test]
    fn move_request_accepts_flat_json() {
        let request: MoveToFilmNumberRequest = serde_json::from_value(json!({
            "director": "Agnès Varda",
            "title": "Vagabond",
            "year": 1985,
            "film_number": 2
        }))
        .unwrap();
        assert_eq!(request.film_number, 2);
        assert_eq!(request.movie.into_key().unwrap().year, 1985);
    }

    #[test]
    fn leaderboard_defaults_to_watch_count() {
        let query = CatalogListQuery::default();
        assert_eq!(query.leaderboard_sort(), CatalogSort::leaderboard());
        assert_eq!(query.sort(), CatalogSort::default());
    }
}
