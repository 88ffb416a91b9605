//! The PostgreSQL pool shared by the user, file and share repositories.
//!
//! Only the `postgres` provider opens one. The `memory` provider builds its
//! stores directly and never touches this module.

use std::time::Duration;

use sqlx::Connection;
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::{debug, info};

use filevault_core::config::DatabaseConfig;
use filevault_core::error::{AppError, ErrorKind};
use filevault_core::result::AppResult;

/// Pool handle owned by [`Stores`](crate::Stores).
#[derive(Debug, Clone)]
pub struct DatabasePool {
    pool: PgPool,
}

impl DatabasePool {
    /// Open the pool. Fails at startup if no connection can be made within
    /// `connect_timeout_seconds`.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        let url = redact_url(&config.url);
        info!(
            %url,
            max = config.max_connections,
            min = config.min_connections,
            "Opening catalog pool"
        );

        let pool = pool_options(config)
            .connect(&config.url)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, format!("Cannot reach {url}: {e}"), e)
            })?;

        debug!(size = pool.size(), "Catalog pool ready");
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Round-trips one pooled connection.
    pub async fn health_check(&self) -> AppResult<bool> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "No catalog connection", e))?;
        conn.ping()
            .await
            .map(|()| true)
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Catalog ping failed", e))
    }

    pub async fn close(&self) {
        self.pool.close().await;
        info!("Catalog pool closed");
    }
}

fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
        .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
}

/// `postgres://vault:s3cr3t@db/filevault` becomes `postgres://vault:****@db/filevault`.
fn redact_url(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };
    let Some((userinfo, host)) = rest.rsplit_once('@') else {
        return url.to_string();
    };
    match userinfo.split_once(':') {
        Some((user, _)) => format!("{scheme}://{user}:****@{host}"),
        None => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_url() {
        assert_eq!(
            redact_url("postgres://vault:s3cr3t@db:5432/filevault"),
            "postgres://vault:****@db:5432/filevault"
        );
        // '@' inside the password
        assert_eq!(
            redact_url("postgres://vault:p@ss@db/filevault"),
            "postgres://vault:****@db/filevault"
        );
        assert_eq!(
            redact_url("postgres://vault@db:5432/filevault"),
            "postgres://vault@db:5432/filevault"
        );
        assert_eq!(redact_url("postgres://db:5432/filevault"), "postgres://db:5432/filevault");
        assert_eq!(redact_url("not a url"), "not a url");
    }

    #[test]
    fn test_pool_options_follow_config() {
        let config = DatabaseConfig {
            max_connections: 7,
            min_connections: 2,
            connect_timeout_seconds: 3,
            idle_timeout_seconds: 90,
            ..DatabaseConfig::default()
        };
        let options = pool_options(&config);
        assert_eq!(options.get_max_connections(), 7);
        assert_eq!(options.get_min_connections(), 2);
        assert_eq!(options.get_acquire_timeout(), Duration::from_secs(3));
        assert_eq!(options.get_idle_timeout(), Some(Duration::from_secs(90)));
    }
}
