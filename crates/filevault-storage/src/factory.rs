//! Object store construction from configuration.

use std::sync::Arc;

use tracing::info;

use filevault_core::config::{StorageConfig, StorageProvider};
use filevault_core::result::AppResult;
use filevault_core::traits::storage::ObjectStore;

use crate::providers::{LocalObjectStore, MemoryObjectStore};

/// Build the configured object store.
///
/// Selecting `s3` without the `s3` feature compiled in is a configuration
/// error.
pub async fn build_object_store(config: &StorageConfig) -> AppResult<Arc<dyn ObjectStore>> {
    let store: Arc<dyn ObjectStore> = match config.provider {
        StorageProvider::Local => Arc::new(LocalObjectStore::new(&config.local.root_path).await?),
        StorageProvider::Memory => Arc::new(MemoryObjectStore::new()),
        #[cfg(feature = "s3")]
        StorageProvider::S3 => {
            Arc::new(crate::providers::S3ObjectStore::from_config(&config.s3).await?)
        }
        #[cfg(not(feature = "s3"))]
        StorageProvider::S3 => {
            return Err(filevault_core::error::AppError::configuration(
                "storage.provider = \"s3\" requires the `s3` feature",
            ));
        }
    };

    info!(provider = store.provider_type(), "Object store ready");
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_builds_local_store() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = StorageConfig::default();
        config.local.root_path = dir.path().join("objects").to_string_lossy().into_owned();

        let store = build_object_store(&config).await.unwrap();
        assert_eq!(store.provider_type(), "local");
        assert!(store.health_check().await.unwrap());
    }

    #[cfg(not(feature = "s3"))]
    #[tokio::test]
    async fn test_s3_without_feature_is_configuration_error() {
        let config = StorageConfig {
            provider: StorageProvider::S3,
            ..StorageConfig::default()
        };
        let err = build_object_store(&config).await.err().unwrap();
        assert_eq!(err.kind, filevault_core::error::ErrorKind::Configuration);
    }
}
