//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use filevault_auth::password::PasswordHasher;
use filevault_auth::session::SessionManager;
use filevault_core::config::AppConfig;
use filevault_core::error::AppError;
use filevault_core::traits::storage::ObjectStore;
use filevault_database::Stores;
use filevault_service::file::{DownloadService, FileService, UploadService, VersionResolver};
use filevault_service::share::ShareService;
use filevault_service::user::UserService;

/// Shared application state passed to all Axum handlers via `State<AppState>`.
///
/// Every field is behind an `Arc` or is itself cheaply cloneable.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Catalog, share registry and credential stores.
    pub stores: Stores,
    /// Blob storage.
    pub objects: Arc<dyn ObjectStore>,
    /// Login and token verification.
    pub session_manager: Arc<SessionManager>,
    /// Registration.
    pub user_service: Arc<UserService>,
    /// Versioned uploads.
    pub upload_service: Arc<UploadService>,
    /// Access-controlled downloads.
    pub download_service: Arc<DownloadService>,
    /// Catalog listings.
    pub file_service: Arc<FileService>,
    /// Sharing.
    pub share_service: Arc<ShareService>,
}

impl AppState {
    /// Wire services on top of the given stores and object store.
    pub fn new(
        config: AppConfig,
        stores: Stores,
        objects: Arc<dyn ObjectStore>,
    ) -> Result<Self, AppError> {
        let hasher = Arc::new(PasswordHasher::new());

        let session_manager = Arc::new(SessionManager::new(
            &config.auth,
            Arc::clone(&stores.users),
            Arc::clone(&hasher),
        )?);
        let user_service = Arc::new(UserService::new(
            Arc::clone(&stores.users),
            Arc::clone(&hasher),
        ));

        let resolver = VersionResolver::new(Arc::clone(&stores.files), Arc::clone(&stores.shares));
        let upload_service = Arc::new(UploadService::new(
            Arc::clone(&stores.files),
            Arc::clone(&objects),
            resolver,
            config.storage.max_upload_size_bytes,
        ));
        let download_service = Arc::new(DownloadService::new(
            Arc::clone(&stores.files),
            Arc::clone(&stores.shares),
            Arc::clone(&objects),
        ));
        let file_service = Arc::new(FileService::new(Arc::clone(&stores.files)));
        let share_service = Arc::new(ShareService::new(
            Arc::clone(&stores.files),
            Arc::clone(&stores.shares),
            Arc::clone(&stores.users),
        ));

        Ok(Self {
            config: Arc::new(config),
            stores,
            objects,
            session_manager,
            user_service,
            upload_service,
            download_service,
            file_service,
            share_service,
        })
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("database", &self.stores.provider())
            .field("storage", &self.objects.provider_type())
            .finish_non_exhaustive()
    }
}
