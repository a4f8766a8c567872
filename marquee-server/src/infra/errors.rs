use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;

use marquee_core::api::types::ErrorBody;
use marquee_core::model::ModelError;
use marquee_core::{CatalogError, ProviderError, UserError, WatchlistError};

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    pub fn gone(message: impl Into<String>) -> Self {
        Self::new(StatusCode::GONE, message)
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::new(StatusCode::TOO_MANY_REQUESTS, message)
    }

    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_GATEWAY, message)
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::SERVICE_UNAVAILABLE, message)
    }

    /// Store failures are logged in full and reported without detail.
    fn database(detail: &str) -> Self {
        tracing::error!(error = %detail, "database operation failed");
        Self::internal("Database operation failed")
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: self.message,
        });

        (self.status, body).into_response()
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound(_) | CatalogError::EmptyCatalog => {
                Self::not_found(err.to_string())
            }
            CatalogError::Duplicate(_) => Self::conflict(err.to_string()),
            CatalogError::AlreadyDeleted(_) => Self::gone(err.to_string()),
            CatalogError::InvalidInput(_) => Self::bad_request(err.to_string()),
            CatalogError::Database(detail) => Self::database(&detail),
        }
    }
}

impl From<WatchlistError> for AppError {
    fn from(err: WatchlistError) -> Self {
        match err {
            WatchlistError::NotFound(_) => Self::not_found(err.to_string()),
            WatchlistError::AlreadyInWatchlist(_) => {
                Self::conflict(err.to_string())
            }
            WatchlistError::OutOfRange { .. }
            | WatchlistError::EmptyWatchlist
            | WatchlistError::InvalidInput(_) => {
                Self::bad_request(err.to_string())
            }
            WatchlistError::DanglingReference(id) => {
                tracing::error!(catalog_id = %id, "watchlist entry does not resolve");
                Self::internal(err.to_string())
            }
            WatchlistError::Catalog(inner) => inner.into(),
        }
    }
}

impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::UsernameTaken(_) => Self::conflict(err.to_string()),
            UserError::UnknownUser(_) => Self::not_found(err.to_string()),
            UserError::InvalidCredentials => {
                Self::unauthorized(err.to_string())
            }
            UserError::InvalidInput(_) => Self::bad_request(err.to_string()),
            UserError::Crypto(detail) => {
                tracing::error!(error = %detail, "password hashing failed");
                Self::internal("Password processing failed")
            }
            UserError::Database(detail) => Self::database(&detail),
        }
    }
}

impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::MissingApiKey => {
                Self::service_unavailable(err.to_string())
            }
            ProviderError::NotFound => Self::not_found("Metadata not found"),
            ProviderError::RateLimited => Self::rate_limited(err.to_string()),
            _ => {
                tracing::error!(error = %err, "metadata provider request failed");
                Self::bad_gateway(format!("Metadata provider error: {err}"))
            }
        }
    }
}

impl From<ModelError> for AppError {
    fn from(err: ModelError) -> Self {
        Self::bad_request(err.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::internal(err.to_string())
    }
}
