//! Health check handler.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use crate::dto::response::{ApiResponse, ComponentHealth, HealthResponse};
use crate::state::AppState;

/// GET /health
///
/// Answers 503 when either the catalog or the object store fails its check.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<ApiResponse<HealthResponse>>) {
    let database_ok = match state.stores.health_check().await {
        Ok(ok) => ok,
        Err(e) => {
            tracing::warn!(error = %e, "Database health check failed");
            false
        }
    };
    let storage_ok = match state.objects.health_check().await {
        Ok(ok) => ok,
        Err(e) => {
            tracing::warn!(error = %e, "Object store health check failed");
            false
        }
    };

    let healthy = database_ok && storage_ok;
    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let body = HealthResponse {
        status: if healthy { "ok" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: ComponentHealth {
            provider: state.stores.provider().to_string(),
            healthy: database_ok,
        },
        storage: ComponentHealth {
            provider: state.objects.provider_type().to_string(),
            healthy: storage_ok,
        },
    };

    (status, Json(ApiResponse::ok(body)))
}
