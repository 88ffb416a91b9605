//! Store bundle selected by configuration.

use std::sync::Arc;

use tracing::info;

use filevault_core::config::{DatabaseConfig, DatabaseProvider};
use filevault_core::result::AppResult;

use crate::connection::DatabasePool;
use crate::memory::{InMemoryFileStore, InMemoryShareStore, InMemoryUserStore};
use crate::migration::run_migrations;
use crate::repositories::{FileRepository, ShareRepository, UserRepository};
use crate::traits::{FileStore, ShareStore, UserStore};

/// The three catalog stores, backed by one provider.
#[derive(Clone)]
pub struct Stores {
    /// Credential store.
    pub users: Arc<dyn UserStore>,
    /// File catalog.
    pub files: Arc<dyn FileStore>,
    /// Share registry.
    pub shares: Arc<dyn ShareStore>,
    pool: Option<DatabasePool>,
}

impl Stores {
    /// Build the stores for the configured provider, connecting and
    /// migrating PostgreSQL when selected.
    pub async fn from_config(config: &DatabaseConfig) -> AppResult<Self> {
        match config.provider {
            DatabaseProvider::Postgres => {
                let pool = DatabasePool::connect(config).await?;
                if config.run_migrations {
                    run_migrations(pool.pool()).await?;
                }
                Ok(Self::postgres(pool))
            }
            DatabaseProvider::Memory => {
                info!("Using in-memory stores; data will not survive a restart");
                Ok(Self::in_memory())
            }
        }
    }

    /// Stores backed by a PostgreSQL pool.
    pub fn postgres(pool: DatabasePool) -> Self {
        let pg = pool.pool().clone();
        Self {
            users: Arc::new(UserRepository::new(pg.clone())),
            files: Arc::new(FileRepository::new(pg.clone())),
            shares: Arc::new(ShareRepository::new(pg)),
            pool: Some(pool),
        }
    }

    /// Process-local stores.
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(InMemoryUserStore::new()),
            files: Arc::new(InMemoryFileStore::new()),
            shares: Arc::new(InMemoryShareStore::new()),
            pool: None,
        }
    }

    /// Name of the backing provider.
    pub fn provider(&self) -> &'static str {
        if self.pool.is_some() {
            "postgres"
        } else {
            "memory"
        }
    }

    /// Check connectivity of the backing provider.
    pub async fn health_check(&self) -> AppResult<bool> {
        match &self.pool {
            Some(pool) => pool.health_check().await,
            None => Ok(true),
        }
    }

    /// Release database connections, if any.
    pub async fn close(&self) {
        if let Some(pool) = &self.pool {
            pool.close().await;
        }
    }
}
