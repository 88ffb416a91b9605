//! File catalog repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use filevault_core::error::{AppError, ErrorKind};
use filevault_core::result::AppResult;
use filevault_core::types::{FileId, UserId};
use filevault_entity::file::{CreateFile, File};

use crate::traits::FileStore;

/// PostgreSQL-backed file catalog.
#[derive(Debug, Clone)]
pub struct FileRepository {
    pool: PgPool,
}

impl FileRepository {
    /// Create a new file repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FileStore for FileRepository {
    async fn create(&self, data: &CreateFile) -> AppResult<File> {
        sqlx::query_as::<_, File>(
            "INSERT INTO files (name, storage_key, owner_id, version, size_bytes, content_type) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.storage_key)
        .bind(data.owner_id)
        .bind(data.version)
        .bind(data.size_bytes)
        .bind(&data.content_type)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("files_owner_name_version_key") =>
            {
                AppError::retryable_conflict(format!(
                    "Version {} of '{}' was recorded concurrently",
                    data.version, data.name
                ))
            }
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("files_storage_key_key") =>
            {
                AppError::conflict(format!("Storage key '{}' already exists", data.storage_key))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create file", e),
        })
    }

    async fn find_by_id(&self, id: FileId) -> AppResult<Option<File>> {
        sqlx::query_as::<_, File>("SELECT * FROM files WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find file by id", e))
    }

    async fn find_by_ids(&self, ids: &[FileId]) -> AppResult<Vec<File>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<Uuid> = ids.iter().map(|id| id.into_uuid()).collect();
        sqlx::query_as::<_, File>(
            "SELECT * FROM files WHERE id = ANY($1) ORDER BY created_at DESC, id",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find files by ids", e))
    }

    async fn find_latest(&self, owner_id: UserId, name: &str) -> AppResult<Option<File>> {
        sqlx::query_as::<_, File>(
            "SELECT * FROM files WHERE owner_id = $1 AND name = $2 \
             ORDER BY version DESC LIMIT 1",
        )
        .bind(owner_id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find latest version", e))
    }

    async fn find_by_owner(&self, owner_id: UserId) -> AppResult<Vec<File>> {
        sqlx::query_as::<_, File>(
            "SELECT * FROM files WHERE owner_id = $1 ORDER BY name, version DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list owned files", e))
    }

    async fn find_versions(&self, owner_id: UserId, name: &str) -> AppResult<Vec<File>> {
        sqlx::query_as::<_, File>(
            "SELECT * FROM files WHERE owner_id = $1 AND name = $2 ORDER BY version DESC",
        )
        .bind(owner_id)
        .bind(name)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list file versions", e))
    }
}
