//! Application builder: wires router, middleware, and state into an Axum
//! app and runs it.

use std::future::IntoFuture;
use std::time::Duration;

use axum::Router;
use tokio::sync::watch;

use filevault_core::config::AppConfig;
use filevault_core::error::AppError;
use filevault_database::Stores;
use filevault_storage::build_object_store;

use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}

/// Runs the FileVault server with the given configuration.
///
/// Connects the configured stores, serves until SIGINT/SIGTERM, then drains
/// in-flight requests for at most `server.shutdown_grace_seconds`.
pub async fn run_server(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting FileVault server...");

    tracing::info!(provider = ?config.database.provider, "Initializing catalog stores...");
    let stores = Stores::from_config(&config.database).await?;

    tracing::info!(provider = ?config.storage.provider, "Initializing object store...");
    let objects = build_object_store(&config.storage).await?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);

    let app = build_app(AppState::new(config, stores.clone(), objects)?);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("FileVault server listening on {}", addr);

    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received, draining connections");
            let _ = shutdown_tx.send(true);
        })
        .into_future();

    let drain_deadline = async move {
        if shutdown_rx.wait_for(|stopping| *stopping).await.is_err() {
            std::future::pending::<()>().await;
        }
        tokio::time::sleep(grace).await;
    };

    let result = tokio::select! {
        res = server => res.map_err(|e| AppError::internal(format!("Server error: {e}"))),
        _ = drain_deadline => {
            tracing::warn!(grace_seconds = grace.as_secs(), "Graceful shutdown timed out");
            Ok(())
        }
    };

    stores.close().await;
    tracing::info!("FileVault server stopped");

    result
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
