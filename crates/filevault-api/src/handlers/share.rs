//! Share handlers.

use axum::Json;
use axum::extract::State;

use crate::dto::request::ShareRequest;
use crate::dto::response::{ApiResponse, FilesEnvelope, ShareEnvelope};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /share/share
pub async fn create_share(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<ShareRequest>,
) -> Result<Json<ApiResponse<ShareEnvelope>>, ApiError> {
    let share = state.share_service.create_share(&auth, req.into()).await?;
    Ok(Json(ApiResponse::ok(ShareEnvelope { share })))
}

/// GET /share/shared
pub async fn list_shared(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Json<ApiResponse<FilesEnvelope>> {
    let files = state.share_service.list_shared_with_me(&auth).await;
    Json(ApiResponse::ok(FilesEnvelope { files }))
}
