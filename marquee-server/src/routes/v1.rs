use axum::{
    Router,
    routing::{get, post, put},
};

use marquee_core::api::routes::v1;

use crate::handlers::{catalog, metadata, playback, system, users, watchlist};
use crate::infra::app_state::AppState;

/// Create all v1 API routes
pub fn create_v1_router() -> Router<AppState> {
    Router::new()
        .route(v1::system::HEALTH, get(system::health_handler))
        .route(v1::system::DB_CHECK, get(system::db_check_handler))
        .merge(create_user_routes())
        .merge(create_catalog_routes())
        .merge(create_watchlist_routes())
        .merge(create_playback_routes())
        .merge(create_metadata_routes())
}

fn create_user_routes() -> Router<AppState> {
    Router::new()
        .route(v1::users::COLLECTION, post(users::create_user_handler))
        .route(v1::users::PASSWORD, put(users::update_password_handler))
        .route(v1::auth::LOGIN, post(users::login_handler))
}

fn create_catalog_routes() -> Router<AppState> {
    Router::new()
        .route(
            v1::catalog::MOVIES,
            post(catalog::create_movie_handler)
                .get(catalog::list_movies_handler)
                .delete(catalog::clear_catalog_handler),
        )
        .route(
            v1::catalog::MOVIE,
            get(catalog::get_movie_handler)
                .delete(catalog::delete_movie_handler),
        )
        .route(v1::catalog::LOOKUP, get(catalog::lookup_movie_handler))
        .route(v1::catalog::RANDOM, get(catalog::random_movie_handler))
        .route(v1::catalog::LEADERBOARD, get(catalog::leaderboard_handler))
}

fn create_watchlist_routes() -> Router<AppState> {
    Router::new()
        .route(
            v1::watchlist::MOVIES,
            post(watchlist::add_movie_handler)
                .get(watchlist::list_watchlist_handler)
                .delete(watchlist::remove_movie_handler),
        )
        .route(
            v1::watchlist::FILM,
            get(watchlist::get_film_handler)
                .delete(watchlist::remove_film_handler),
        )
        .route(v1::watchlist::CLEAR, post(watchlist::clear_watchlist_handler))
        .route(v1::watchlist::CURRENT, get(watchlist::current_film_handler))
        .route(v1::watchlist::SUMMARY, get(watchlist::summary_handler))
        .route(
            v1::watchlist::moves::BEGINNING,
            post(watchlist::move_to_beginning_handler),
        )
        .route(v1::watchlist::moves::END, post(watchlist::move_to_end_handler))
        .route(
            v1::watchlist::moves::FILM_NUMBER,
            post(watchlist::move_to_film_number_handler),
        )
        .route(v1::watchlist::SWAP, post(watchlist::swap_handler))
}

fn create_playback_routes() -> Router<AppState> {
    Router::new()
        .route(v1::watchlist::REWIND, post(playback::rewind_handler))
        .route(
            v1::watchlist::GO_TO,
            post(playback::go_to_film_number_handler),
        )
        .route(v1::watchlist::play::CURRENT, post(playback::play_current_handler))
        .route(v1::watchlist::play::REST, post(playback::play_rest_handler))
        .route(v1::watchlist::play::ALL, post(playback::play_all_handler))
}

fn create_metadata_routes() -> Router<AppState> {
    Router::new()
        .route(
            v1::metadata::DIRECTOR,
            get(metadata::movies_by_director_handler),
        )
        .route(v1::metadata::TOP_RATED, get(metadata::top_rated_handler))
        .route(v1::metadata::SEARCH, get(metadata::search_by_title_handler))
        .route(v1::metadata::MOVIE, get(metadata::movie_details_handler))
}
