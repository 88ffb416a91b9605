//! In-memory object store.

use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;
use futures::stream;
use tracing::debug;

use filevault_core::error::AppError;
use filevault_core::result::AppResult;
use filevault_core::traits::storage::{ByteStream, ObjectStore};

/// Object store holding blobs in a concurrent map.
#[derive(Debug, Default)]
pub struct MemoryObjectStore {
    objects: DashMap<String, Bytes>,
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a blob exists for `key`
    pub fn contains(&self, key: &str) -> bool {
        self.objects.contains_key(key)
    }

    /// Number of stored blobs
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    fn provider_type(&self) -> &str {
        "memory"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    async fn put(&self, key: &str, data: Bytes) -> AppResult<()> {
        debug!(key, bytes = data.len(), "Stored object in memory");
        self.objects.insert(key.to_string(), data);
        Ok(())
    }

    async fn get_stream(&self, key: &str) -> AppResult<ByteStream> {
        let data = self
            .objects
            .get(key)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| AppError::not_found(format!("Object not found: {key}")))?;
        Ok(Box::pin(stream::once(async move { Ok(data) })))
    }
}
