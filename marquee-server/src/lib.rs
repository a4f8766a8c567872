//! # Marquee Server
//!
//! axum HTTP layer over [`marquee_core`]: configuration, application state,
//! error mapping and the versioned route table.

pub mod handlers;
pub mod infra;
pub mod routes;

use axum::Router;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::infra::app_state::AppState;

/// Build the full application router with its middleware stack.
pub fn create_app(state: AppState) -> Router {
    // Permissive in dev, allow-list otherwise
    let cors_layer = if state.config.dev_mode {
        CorsLayer::permissive()
    } else {
        let origins = state
            .config
            .cors
            .origin_header_values()
            .unwrap_or_default();
        if origins.is_empty() {
            CorsLayer::new()
        } else {
            CorsLayer::new().allow_origin(AllowOrigin::list(origins))
        }
    };

    Router::new()
        .merge(routes::create_api_router())
        .layer(cors_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
