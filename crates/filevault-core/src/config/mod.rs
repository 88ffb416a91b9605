//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section, and every field carries a serde default so that an empty
//! configuration still yields a runnable development setup.

pub mod app;
pub mod auth;
pub mod database;
pub mod logging;
pub mod storage;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::auth::AuthConfig;
pub use self::database::{DatabaseConfig, DatabaseProvider};
pub use self::logging::LoggingConfig;
pub use self::storage::{LocalStorageConfig, S3StorageConfig, StorageConfig, StorageProvider};

use crate::error::AppError;

/// Prefix for environment variable overrides, e.g. `FILEVAULT__AUTH__JWT_SECRET`.
const ENV_PREFIX: &str = "FILEVAULT";

/// Root application configuration.
///
/// Top-level deserialization target for the merged configuration
/// (default.toml + environment overlay + environment variables).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Relational store settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Token issuing settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Object store settings.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration for the given environment name.
    ///
    /// Merges `config/default`, `config/{env}` and environment variables
    /// prefixed with `FILEVAULT__` (nested keys separated by `__`).
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_source_uses_defaults() {
        let config: AppConfig = config::Config::builder()
            .build()
            .and_then(|c| c.try_deserialize())
            .expect("defaults");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.auth.token_ttl_hours, 24);
        assert_eq!(config.database.provider, DatabaseProvider::Postgres);
        assert_eq!(config.storage.provider, StorageProvider::Local);
    }

    #[test]
    fn test_toml_overrides() {
        let toml = r#"
            [database]
            provider = "memory"

            [storage]
            provider = "s3"

            [storage.s3]
            bucket = "vault"
        "#;
        let config: AppConfig = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .and_then(|c| c.try_deserialize())
            .expect("parse");
        assert_eq!(config.database.provider, DatabaseProvider::Memory);
        assert_eq!(config.storage.provider, StorageProvider::S3);
        assert_eq!(config.storage.s3.bucket, "vault");
        assert_eq!(config.storage.s3.region, "us-east-1");
    }
}
