//! File download with access control.

use std::sync::Arc;

use tracing::{info, warn};

use filevault_auth::acl;
use filevault_core::error::AppError;
use filevault_core::traits::storage::{ByteStream, ObjectStore};
use filevault_core::types::FileId;
use filevault_database::{FileStore, ShareStore};
use filevault_entity::file::File;

use crate::context::RequestContext;

/// A permitted download: the record and its content stream.
pub struct DownloadResult {
    /// The downloaded record.
    pub file: File,
    /// Blob content.
    pub stream: ByteStream,
}

impl std::fmt::Debug for DownloadResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DownloadResult")
            .field("file", &self.file)
            .finish_non_exhaustive()
    }
}

/// Streams file versions to their owner or read-share recipients.
#[derive(Clone)]
pub struct DownloadService {
    files: Arc<dyn FileStore>,
    shares: Arc<dyn ShareStore>,
    objects: Arc<dyn ObjectStore>,
}

impl std::fmt::Debug for DownloadService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DownloadService")
            .field("objects", &self.objects)
            .finish()
    }
}

impl DownloadService {
    /// Creates a new download service.
    pub fn new(
        files: Arc<dyn FileStore>,
        shares: Arc<dyn ShareStore>,
        objects: Arc<dyn ObjectStore>,
    ) -> Self {
        Self {
            files,
            shares,
            objects,
        }
    }

    /// Download one specific file version.
    pub async fn download(
        &self,
        ctx: &RequestContext,
        file_id: FileId,
    ) -> Result<DownloadResult, AppError> {
        let file = self
            .files
            .find_by_id(file_id)
            .await?
            .ok_or_else(|| AppError::not_found("File not found"))?;

        let shares = if file.is_owned_by(ctx.user_id()) {
            Vec::new()
        } else {
            self.shares
                .find_for_file_and_recipient(file.id, ctx.email())
                .await?
        };

        if let Err(e) = acl::can_download(&ctx.identity, &file, &shares).into_result() {
            warn!(user_id = %ctx.user_id(), file_id = %file.id, "Download denied");
            return Err(e);
        }

        let stream = self.objects.get_stream(&file.storage_key).await?;
        info!(user_id = %ctx.user_id(), file_id = %file.id, version = file.version, "File downloaded");

        Ok(DownloadResult { file, stream })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Harness;
    use filevault_core::error::ErrorKind;
    use filevault_entity::share::{CreateShare, SharePermission};
    use futures::TryStreamExt;

    async fn body(result: DownloadResult) -> Vec<u8> {
        let chunks: Vec<_> = result.stream.try_collect().await.unwrap();
        chunks.concat()
    }

    async fn grant(h: &Harness, file: &File, email: &str, permission: SharePermission) {
        h.shares
            .create(&CreateShare {
                file_id: file.id,
                shared_with: email.to_string(),
                permission,
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_owner_downloads_content() {
        let h = Harness::new();
        let alice = h.user("a@x.com").await;
        let file = h.store_file(&alice, "report.txt", b"hello").await;

        let result = h.download.download(&alice, file.id).await.unwrap();
        assert_eq!(result.file.id, file.id);
        assert_eq!(body(result).await, b"hello");
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let h = Harness::new();
        let alice = h.user("a@x.com").await;
        let err = h.download.download(&alice, FileId::new()).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert_eq!(err.message, "File not found");
    }

    #[tokio::test]
    async fn test_read_share_grants_download_write_does_not() {
        let h = Harness::new();
        let alice = h.user("a@x.com").await;
        let bob = h.user("b@x.com").await;
        let carol = h.user("c@x.com").await;
        let file = h.store_file(&alice, "report.txt", b"hello").await;
        grant(&h, &file, "b@x.com", SharePermission::Read).await;
        grant(&h, &file, "c@x.com", SharePermission::Write).await;

        assert!(h.download.download(&bob, file.id).await.is_ok());

        let err = h.download.download(&carol, file.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);
        assert_eq!(err.message, "No permission to download");
    }

    #[tokio::test]
    async fn test_missing_blob_is_not_found() {
        let h = Harness::new();
        let alice = h.user("a@x.com").await;
        let record = h
            .files
            .create(&filevault_entity::file::CreateFile {
                name: "ghost.txt".to_string(),
                storage_key: "never-written".to_string(),
                owner_id: alice.user_id(),
                version: 1,
                size_bytes: 0,
                content_type: None,
            })
            .await
            .unwrap();

        let err = h.download.download(&alice, record.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }
}
