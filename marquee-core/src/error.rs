use marquee_model::{CatalogId, ModelError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Movie not found: {0}")]
    NotFound(String),

    #[error("Movie already exists: {0}")]
    Duplicate(String),

    #[error("Movie has already been deleted: {0}")]
    AlreadyDeleted(String),

    #[error("Invalid movie: {0}")]
    InvalidInput(String),

    #[error("The movie catalog is empty")]
    EmptyCatalog,

    #[error("Database error: {0}")]
    Database(String),
}

impl From<ModelError> for CatalogError {
    fn from(err: ModelError) -> Self {
        CatalogError::InvalidInput(err.to_string())
    }
}

#[cfg(feature = "database")]
impl From<sqlx::Error> for CatalogError {
    fn from(err: sqlx::Error) -> Self {
        CatalogError::Database(err.to_string())
    }
}

#[derive(Error, Debug)]
pub enum WatchlistError {
    #[error("Not in watchlist: {0}")]
    NotFound(String),

    #[error("Movie already in watchlist: {0}")]
    AlreadyInWatchlist(String),

    #[error("Invalid film number: {film_number} (watchlist has {length} films)")]
    OutOfRange { film_number: usize, length: usize },

    #[error("Watchlist is empty")]
    EmptyWatchlist,

    #[error("Watchlist references catalog id {0} which no longer resolves")]
    DanglingReference(CatalogId),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl WatchlistError {
    /// Whether the requested movie does not exist, either in the watchlist or
    /// in the catalog.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            WatchlistError::NotFound(_)
                | WatchlistError::Catalog(CatalogError::NotFound(_))
        )
    }
}

impl From<ModelError> for WatchlistError {
    fn from(err: ModelError) -> Self {
        WatchlistError::InvalidInput(err.to_string())
    }
}

#[derive(Error, Debug)]
pub enum UserError {
    #[error("User with username '{0}' already exists")]
    UsernameTaken(String),

    #[error("User '{0}' not found")]
    UnknownUser(String),

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Password hashing error: {0}")]
    Crypto(String),

    #[error("Database error: {0}")]
    Database(String),
}

#[cfg(feature = "database")]
impl From<sqlx::Error> for UserError {
    fn from(err: sqlx::Error) -> Self {
        UserError::Database(err.to_string())
    }
}

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Not found")]
    NotFound,

    #[error("Rate limited")]
    RateLimited,

    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("TMDB API key is not configured")]
    MissingApiKey,

    #[error("Parse error: {0}")]
    Parse(String),
}

pub type Result<T, E = WatchlistError> = std::result::Result<T, E>;
