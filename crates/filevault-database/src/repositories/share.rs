//! Share registry repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use filevault_core::error::{AppError, ErrorKind};
use filevault_core::result::AppResult;
use filevault_core::types::FileId;
use filevault_entity::share::{CreateShare, Share};

use crate::traits::ShareStore;

/// PostgreSQL-backed share registry.
#[derive(Debug, Clone)]
pub struct ShareRepository {
    pool: PgPool,
}

impl ShareRepository {
    /// Create a new share repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ShareStore for ShareRepository {
    async fn create(&self, data: &CreateShare) -> AppResult<Share> {
        sqlx::query_as::<_, Share>(
            "INSERT INTO shares (file_id, shared_with, permission) \
             VALUES ($1, $2, $3) \
             RETURNING *",
        )
        .bind(data.file_id)
        .bind(&data.shared_with)
        .bind(data.permission)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create share", e))
    }

    async fn find_for_file_and_recipient(
        &self,
        file_id: FileId,
        email: &str,
    ) -> AppResult<Vec<Share>> {
        sqlx::query_as::<_, Share>(
            "SELECT * FROM shares WHERE file_id = $1 AND shared_with = $2 ORDER BY created_at",
        )
        .bind(file_id)
        .bind(email)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find shares", e))
    }

    async fn find_by_recipient(&self, email: &str) -> AppResult<Vec<Share>> {
        sqlx::query_as::<_, Share>(
            "SELECT * FROM shares WHERE shared_with = $1 ORDER BY created_at",
        )
        .bind(email)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find shares by recipient", e)
        })
    }
}
