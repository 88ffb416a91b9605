//! In-memory file catalog.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use filevault_core::error::AppError;
use filevault_core::result::AppResult;
use filevault_core::types::{FileId, UserId};
use filevault_entity::file::{CreateFile, File};

use crate::traits::FileStore;

/// In-memory file catalog. Records are kept in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryFileStore {
    files: RwLock<Vec<File>>,
}

impl InMemoryFileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of recorded versions across all owners
    pub async fn count(&self) -> usize {
        self.files.read().await.len()
    }
}

fn sort_versions_desc(files: &mut [File]) {
    files.sort_by(|a, b| a.name.cmp(&b.name).then(b.version.cmp(&a.version)));
}

#[async_trait]
impl FileStore for InMemoryFileStore {
    async fn create(&self, data: &CreateFile) -> AppResult<File> {
        let mut files = self.files.write().await;

        if files
            .iter()
            .any(|f| f.owner_id == data.owner_id && f.name == data.name && f.version == data.version)
        {
            return Err(AppError::retryable_conflict(format!(
                "Version {} of '{}' was recorded concurrently",
                data.version, data.name
            )));
        }
        if files.iter().any(|f| f.storage_key == data.storage_key) {
            return Err(AppError::conflict(format!(
                "Storage key '{}' already exists",
                data.storage_key
            )));
        }

        let file = File {
            id: FileId::new(),
            name: data.name.clone(),
            storage_key: data.storage_key.clone(),
            owner_id: data.owner_id,
            version: data.version,
            is_public: false,
            size_bytes: data.size_bytes,
            content_type: data.content_type.clone(),
            created_at: Utc::now(),
        };
        files.push(file.clone());
        Ok(file)
    }

    async fn find_by_id(&self, id: FileId) -> AppResult<Option<File>> {
        let files = self.files.read().await;
        Ok(files.iter().find(|f| f.id == id).cloned())
    }

    async fn find_by_ids(&self, ids: &[FileId]) -> AppResult<Vec<File>> {
        let files = self.files.read().await;
        Ok(files
            .iter()
            .rev()
            .filter(|f| ids.contains(&f.id))
            .cloned()
            .collect())
    }

    async fn find_latest(&self, owner_id: UserId, name: &str) -> AppResult<Option<File>> {
        let files = self.files.read().await;
        Ok(files
            .iter()
            .filter(|f| f.owner_id == owner_id && f.name == name)
            .max_by_key(|f| f.version)
            .cloned())
    }

    async fn find_by_owner(&self, owner_id: UserId) -> AppResult<Vec<File>> {
        let files = self.files.read().await;
        let mut owned: Vec<File> = files
            .iter()
            .filter(|f| f.owner_id == owner_id)
            .cloned()
            .collect();
        sort_versions_desc(&mut owned);
        Ok(owned)
    }

    async fn find_versions(&self, owner_id: UserId, name: &str) -> AppResult<Vec<File>> {
        let files = self.files.read().await;
        let mut versions: Vec<File> = files
            .iter()
            .filter(|f| f.owner_id == owner_id && f.name == name)
            .cloned()
            .collect();
        sort_versions_desc(&mut versions);
        Ok(versions)
    }
}
