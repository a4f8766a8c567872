use axum::{Json, extract::State, http::StatusCode};

use marquee_core::api::types::{
    ApiResponse, ClearedBody, CompoundKeyRequest, CurrentFilmBody, MovieBody,
    MoveToFilmNumberRequest, SummaryBody, SwapRequest, WatchlistBody,
    WatchlistItemBody,
};
use marquee_core::watchlist::Removal;

use crate::infra::{
    app_state::AppState,
    errors::AppResult,
    extract::{ApiJson, ApiPath},
};

/// Append a catalog movie to the watchlist.
///
/// # Request
///
/// ```json
/// { "director": "Wong Kar-wai", "title": "In the Mood for Love", "year": 2000 }
/// ```
///
/// # Response
///
/// - `201 Created` with the new slot, including its film number
/// - `404 Not Found` when the catalog has no such movie
/// - `409 Conflict` when the movie is already queued
pub async fn add_movie_handler(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CompoundKeyRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<WatchlistItemBody>>)> {
    let key = request.into_key()?;
    let message = format!("Added {key} to watchlist");
    let movie = state.watchlist.add(key).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(WatchlistItemBody { movie }).with_message(message)),
    ))
}

/// Remove a movie by compound key. Responds with the remaining watchlist.
pub async fn remove_movie_handler(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CompoundKeyRequest>,
) -> AppResult<Json<ApiResponse<WatchlistBody>>> {
    let key = request.into_key()?;
    let Removal { removed, remaining } =
        state.watchlist.remove_by_compound_key(&key).await?;

    Ok(Json(
        ApiResponse::success(WatchlistBody { watchlist: remaining })
            .with_message(format!("Removed {} from watchlist", removed.key)),
    ))
}

pub async fn list_watchlist_handler(
    State(state): State<AppState>,
) -> Json<ApiResponse<WatchlistBody>> {
    let watchlist = state.watchlist.get_all().await;
    Json(ApiResponse::success(WatchlistBody { watchlist }))
}

pub async fn remove_film_handler(
    State(state): State<AppState>,
    ApiPath(film_number): ApiPath<usize>,
) -> AppResult<Json<ApiResponse<WatchlistBody>>> {
    let Removal { removed, remaining } =
        state.watchlist.remove_by_film_number(film_number).await?;

    Ok(Json(
        ApiResponse::success(WatchlistBody { watchlist: remaining })
            .with_message(format!("Removed {} from watchlist", removed.key)),
    ))
}

/// Resolve the catalog record at a film number.
pub async fn get_film_handler(
    State(state): State<AppState>,
    ApiPath(film_number): ApiPath<usize>,
) -> AppResult<Json<ApiResponse<MovieBody>>> {
    let movie = state.watchlist.get_by_film_number(film_number).await?;
    Ok(Json(ApiResponse::success(MovieBody { movie })))
}

pub async fn clear_watchlist_handler(
    State(state): State<AppState>,
) -> Json<ApiResponse<ClearedBody>> {
    let removed = state.watchlist.clear().await;
    Json(ApiResponse::success(ClearedBody { removed }).with_message("Watchlist cleared"))
}

pub async fn current_film_handler(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<CurrentFilmBody>>> {
    let current = state.watchlist.current().await?;
    Ok(Json(ApiResponse::success(CurrentFilmBody { current })))
}

/// Number of queued films and their combined runtime in minutes.
pub async fn summary_handler(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<SummaryBody>>> {
    let summary = state.watchlist.length_and_total_duration().await?;
    Ok(Json(ApiResponse::success(SummaryBody { summary })))
}

pub async fn move_to_beginning_handler(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CompoundKeyRequest>,
) -> AppResult<Json<ApiResponse<WatchlistBody>>> {
    let key = request.into_key()?;
    let watchlist = state.watchlist.move_to_beginning(&key).await?;
    Ok(Json(ApiResponse::success(WatchlistBody { watchlist })))
}

pub async fn move_to_end_handler(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CompoundKeyRequest>,
) -> AppResult<Json<ApiResponse<WatchlistBody>>> {
    let key = request.into_key()?;
    let watchlist = state.watchlist.move_to_end(&key).await?;
    Ok(Json(ApiResponse::success(WatchlistBody { watchlist })))
}

/// Move a queued movie so it ends up at `film_number`.
///
/// # Request
///
/// ```json
/// { "director": "Wong Kar-wai", "title": "In the Mood for Love", "year": 2000, "film_number": 1 }
/// ```
pub async fn move_to_film_number_handler(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<MoveToFilmNumberRequest>,
) -> AppResult<Json<ApiResponse<WatchlistBody>>> {
    let key = request.movie.into_key()?;
    let watchlist = state
        .watchlist
        .move_to_film_number(&key, request.film_number)
        .await?;
    Ok(Json(ApiResponse::success(WatchlistBody { watchlist })))
}

pub async fn swap_handler(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<SwapRequest>,
) -> AppResult<Json<ApiResponse<WatchlistBody>>> {
    let watchlist = state
        .watchlist
        .swap(request.film_number_1, request.film_number_2)
        .await?;
    Ok(Json(ApiResponse::success(WatchlistBody { watchlist })))
}
