use axum::{Json, extract::State, http::StatusCode};
use tracing::info;

use marquee_core::api::types::{
    ApiResponse, CatalogListQuery, CompoundKeyRequest, CreateMovieRequest,
    DeletedBody, Empty, MovieBody, MoviesBody,
};
use marquee_core::catalog::random_entry;
use marquee_core::model::CatalogId;

use crate::infra::{
    app_state::AppState,
    errors::AppResult,
    extract::{ApiJson, ApiPath, ApiQuery},
};

/// Add a movie to the catalog.
///
/// # Request
///
/// ```json
/// {
///   "director": "Céline Sciamma",
///   "title": "Portrait of a Lady on Fire",
///   "year": 2019,
///   "genre": "Drama",
///   "duration": 122,
///   "rating": 8.1
/// }
/// ```
///
/// # Response
///
/// - `201 Created` with the stored record
/// - `400 Bad Request` when a field fails validation
/// - `409 Conflict` when `(director, title, year)` already exists
pub async fn create_movie_handler(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateMovieRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<MovieBody>>)> {
    let movie = state.catalog.create(request).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(MovieBody { movie }).with_message("Movie created")),
    ))
}

/// List active movies, optionally sorted by rating and/or watch count.
pub async fn list_movies_handler(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<CatalogListQuery>,
) -> AppResult<Json<ApiResponse<MoviesBody>>> {
    let movies = state.catalog.list(query.sort()).await?;
    Ok(Json(ApiResponse::success(MoviesBody { movies })))
}

/// Drop every catalog record. The watchlist is cleared too, since ids are
/// reassigned from the start afterwards.
pub async fn clear_catalog_handler(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Empty>>> {
    let dropped = state
        .watchlist
        .clear_with_catalog(state.catalog.as_ref())
        .await?;
    info!(watchlist_dropped = dropped, "catalog cleared");
    Ok(Json(ApiResponse::ok("Catalog cleared")))
}

pub async fn get_movie_handler(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<ApiResponse<MovieBody>>> {
    let movie = state.catalog.find_by_id(CatalogId(id)).await?;
    Ok(Json(ApiResponse::success(MovieBody { movie })))
}

/// Soft-delete a movie. Watchlist entries pointing at it start to dangle.
///
/// # Response
///
/// - `200 OK` with the deleted id
/// - `404 Not Found` for an unknown id
/// - `410 Gone` when the movie was already deleted
pub async fn delete_movie_handler(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<ApiResponse<DeletedBody>>> {
    let id = CatalogId(id);
    state.catalog.soft_delete(id).await?;
    Ok(Json(
        ApiResponse::success(DeletedBody { id }).with_message("Movie deleted"),
    ))
}

/// Find a movie by `director`, `title` and `year` query parameters.
pub async fn lookup_movie_handler(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<CompoundKeyRequest>,
) -> AppResult<Json<ApiResponse<MovieBody>>> {
    let key = query.into_key()?;
    let movie = state.catalog.find_by_compound_key(&key).await?;
    Ok(Json(ApiResponse::success(MovieBody { movie })))
}

pub async fn random_movie_handler(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<MovieBody>>> {
    let movie = random_entry(state.catalog.as_ref()).await?;
    Ok(Json(ApiResponse::success(MovieBody { movie })))
}

/// Most watched movies first unless the query asks for another order.
pub async fn leaderboard_handler(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<CatalogListQuery>,
) -> AppResult<Json<ApiResponse<MoviesBody>>> {
    let movies = state.catalog.list(query.leaderboard_sort()).await?;
    Ok(Json(ApiResponse::success(MoviesBody { movies })))
}
