use axum::{Json, extract::State, http::StatusCode};
use marquee_core::api::types::{
    ApiResponse, CredentialsRequest, Empty, UserBody,
};

use crate::infra::{app_state::AppState, errors::AppResult, extract::ApiJson};

/// Register a new account.
///
/// # Request
///
/// ```json
/// { "username": "agnes", "password": "cleo-from-5-to-7" }
/// ```
///
/// # Response
///
/// - `201 Created` with the new user's id and name
/// - `400 Bad Request` on blank fields
/// - `409 Conflict` when the username is taken
pub async fn create_user_handler(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CredentialsRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<UserBody>>)> {
    let user = state
        .users
        .create_account(&request.username, &request.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(
            ApiResponse::success(UserBody {
                id: user.id,
                username: user.username,
            })
            .with_message("User created"),
        ),
    ))
}

pub async fn update_password_handler(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CredentialsRequest>,
) -> AppResult<Json<ApiResponse<Empty>>> {
    state
        .users
        .update_password(&request.username, &request.password)
        .await?;

    Ok(Json(ApiResponse::ok("Password updated")))
}

/// Check credentials. Unknown users and wrong passwords both yield
/// `401 Unauthorized`.
pub async fn login_handler(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CredentialsRequest>,
) -> AppResult<Json<ApiResponse<UserBody>>> {
    let user = state
        .users
        .login(&request.username, &request.password)
        .await?;

    Ok(Json(
        ApiResponse::success(UserBody {
            id: user.id,
            username: user.username,
        })
        .with_message("Login successful"),
    ))
}
