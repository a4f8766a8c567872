use axum::{Json, extract::State};

use marquee_core::api::types::{
    ApiResponse, DirectorQuery, MetadataMovieBody, MetadataMoviesBody,
    TitleQuery,
};

use crate::infra::{
    app_state::AppState,
    errors::AppResult,
    extract::{ApiPath, ApiQuery},
};

/// Movies TMDB credits to a director, matched by exact name.
pub async fn movies_by_director_handler(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<DirectorQuery>,
) -> AppResult<Json<ApiResponse<MetadataMoviesBody>>> {
    let movies = state.metadata.movies_by_director(&query.director).await?;
    Ok(Json(ApiResponse::success(MetadataMoviesBody { movies })))
}

pub async fn top_rated_handler(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<MetadataMoviesBody>>> {
    let movies = state.metadata.top_rated().await?;
    Ok(Json(ApiResponse::success(MetadataMoviesBody { movies })))
}

pub async fn search_by_title_handler(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<TitleQuery>,
) -> AppResult<Json<ApiResponse<MetadataMoviesBody>>> {
    let movies = state.metadata.search_by_title(&query.title).await?;
    Ok(Json(ApiResponse::success(MetadataMoviesBody { movies })))
}

pub async fn movie_details_handler(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<ApiResponse<MetadataMovieBody>>> {
    let movie = state.metadata.movie_details(id).await?;
    Ok(Json(ApiResponse::success(MetadataMovieBody { movie })))
}
