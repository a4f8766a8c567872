use axum::{Json, extract::State};

use marquee_core::api::types::{
    ApiResponse, CurrentFilmBody, Empty, FilmNumberBody, PlaybackBody,
};

use crate::infra::{app_state::AppState, errors::AppResult, extract::ApiPath};

pub async fn rewind_handler(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Empty>>> {
    state.watchlist.rewind().await?;
    Ok(Json(ApiResponse::ok("Watchlist rewound to the first film")))
}

pub async fn go_to_film_number_handler(
    State(state): State<AppState>,
    ApiPath(film_number): ApiPath<usize>,
) -> AppResult<Json<ApiResponse<FilmNumberBody>>> {
    let film_number = state.watchlist.go_to_film_number(film_number).await?;
    Ok(Json(ApiResponse::success(FilmNumberBody { film_number })))
}

/// Play the film under the cursor and bump its watch count. The cursor does
/// not move.
///
/// # Response
///
/// - `200 OK` with the film number and the updated record
/// - `400 Bad Request` on an empty watchlist
/// - `500 Internal Server Error` when the catalog record is gone
pub async fn play_current_handler(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<CurrentFilmBody>>> {
    let current = state.watchlist.play_current().await?;
    Ok(Json(ApiResponse::success(CurrentFilmBody { current })))
}

/// Play from the cursor to the end. Entries whose catalog record is gone
/// are skipped and listed under `dangling`.
pub async fn play_rest_handler(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<PlaybackBody>>> {
    let report = state.watchlist.play_rest().await?;
    Ok(Json(ApiResponse::success(PlaybackBody { report })))
}

pub async fn play_all_handler(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<PlaybackBody>>> {
    let report = state.watchlist.play_all().await?;
    Ok(Json(ApiResponse::success(PlaybackBody { report })))
}
