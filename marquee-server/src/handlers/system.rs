use axum::{Json, extract::State};
use marquee_core::api::types::{ApiResponse, DbCheckBody, HealthBody};

use crate::infra::{app_state::AppState, errors::AppResult};

/// Liveness probe. Never touches the store.
pub async fn health_handler() -> Json<ApiResponse<HealthBody>> {
    Json(ApiResponse::success(HealthBody {
        status: "healthy".to_string(),
    }))
}

/// Round-trip to the catalog store.
///
/// # Response
///
/// - `200 OK` with `{"database_status": "healthy"}`
/// - `500 Internal Server Error` when the store cannot be reached
pub async fn db_check_handler(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<DbCheckBody>>> {
    state.catalog.health_check().await?;
    Ok(Json(ApiResponse::success(DbCheckBody {
        database_status: "healthy".to_string(),
    })))
}
