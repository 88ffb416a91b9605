//! In-memory share registry.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use filevault_core::result::AppResult;
use filevault_core::types::{FileId, ShareId};
use filevault_entity::share::{CreateShare, Share};

use crate::traits::ShareStore;

/// In-memory share registry. Append-only.
#[derive(Debug, Default)]
pub struct InMemoryShareStore {
    shares: RwLock<Vec<Share>>,
}

impl InMemoryShareStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of recorded shares
    pub async fn count(&self) -> usize {
        self.shares.read().await.len()
    }
}

#[async_trait]
impl ShareStore for InMemoryShareStore {
    async fn create(&self, data: &CreateShare) -> AppResult<Share> {
        let share = Share {
            id: ShareId::new(),
            file_id: data.file_id,
            shared_with: data.shared_with.clone(),
            permission: data.permission,
            created_at: Utc::now(),
        };
        self.shares.write().await.push(share.clone());
        Ok(share)
    }

    async fn find_for_file_and_recipient(
        &self,
        file_id: FileId,
        email: &str,
    ) -> AppResult<Vec<Share>> {
        let shares = self.shares.read().await;
        Ok(shares
            .iter()
            .filter(|s| s.file_id == file_id && s.shared_with == email)
            .cloned()
            .collect())
    }

    async fn find_by_recipient(&self, email: &str) -> AppResult<Vec<Share>> {
        let shares = self.shares.read().await;
        Ok(shares
            .iter()
            .filter(|s| s.shared_with == email)
            .cloned()
            .collect())
    }
}
