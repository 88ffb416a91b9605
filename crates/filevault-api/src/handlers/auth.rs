//! Auth handlers: register, login.

use axum::Json;
use axum::extract::State;

use crate::dto::request::{LoginRequest, RegisterRequest};
use crate::dto::response::{ApiResponse, LoginResponse, UserEnvelope};
use crate::error::ApiError;
use crate::state::AppState;

/// POST /auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<ApiResponse<UserEnvelope>>, ApiError> {
    let user = state.user_service.register(req.into()).await?;

    Ok(Json(ApiResponse::ok(UserEnvelope { user: user.into() })))
}

/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    let result = state
        .session_manager
        .login(&req.email, &req.password)
        .await?;

    Ok(Json(ApiResponse::ok(LoginResponse {
        token: result.token,
        expires_at: result.expires_at,
        user: result.user.into(),
    })))
}
