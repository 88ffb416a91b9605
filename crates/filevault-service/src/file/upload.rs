//! Versioned file upload.

use std::sync::Arc;

use bytes::Bytes;
use tracing::{info, warn};

use filevault_core::error::AppError;
use filevault_core::traits::storage::ObjectStore;
use filevault_database::FileStore;
use filevault_entity::file::File;

use crate::context::RequestContext;

use super::version::VersionResolver;

/// A single-request upload.
#[derive(Debug, Clone)]
pub struct UploadFile {
    /// Declared file name.
    pub name: String,
    /// MIME type reported by the client.
    pub content_type: Option<String>,
    /// File content.
    pub data: Bytes,
}

/// Stores payloads and records them as the next version of their name.
#[derive(Clone)]
pub struct UploadService {
    files: Arc<dyn FileStore>,
    objects: Arc<dyn ObjectStore>,
    resolver: VersionResolver,
    max_upload_size_bytes: u64,
}

impl std::fmt::Debug for UploadService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadService")
            .field("objects", &self.objects)
            .field("max_upload_size_bytes", &self.max_upload_size_bytes)
            .finish()
    }
}

impl UploadService {
    /// Creates a new upload service.
    pub fn new(
        files: Arc<dyn FileStore>,
        objects: Arc<dyn ObjectStore>,
        resolver: VersionResolver,
        max_upload_size_bytes: u64,
    ) -> Self {
        Self {
            files,
            objects,
            resolver,
            max_upload_size_bytes,
        }
    }

    /// Upload a payload as the next version of `upload.name`.
    ///
    /// The payload is written to the object store before the catalog
    /// record; a failed object write leaves no record behind.
    pub async fn upload(&self, ctx: &RequestContext, upload: UploadFile) -> Result<File, AppError> {
        if upload.data.len() as u64 > self.max_upload_size_bytes {
            return Err(AppError::validation(format!(
                "File exceeds maximum upload size of {} bytes",
                self.max_upload_size_bytes
            )));
        }

        let _guard = self.resolver.lock(ctx.user_id(), &upload.name).await;
        let plan = self
            .resolver
            .resolve(
                &ctx.identity,
                &upload.name,
                upload.data.len() as i64,
                upload.content_type,
            )
            .await?;

        self.objects.put(&plan.storage_key, upload.data).await?;

        let file = match self.files.create(&plan.record).await {
            Ok(file) => file,
            Err(e) => {
                warn!(
                    user_id = %ctx.user_id(),
                    storage_key = %plan.storage_key,
                    error = %e,
                    "Catalog write failed after object write; blob is orphaned"
                );
                return Err(e);
            }
        };

        info!(
            user_id = %ctx.user_id(),
            file_id = %file.id,
            name = %file.name,
            version = file.version,
            size = file.size_bytes,
            "File version uploaded"
        );
        Ok(file)
    }
}
