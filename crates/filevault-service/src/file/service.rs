//! Catalog listings for the caller's own files.

use std::sync::Arc;

use tracing::warn;

use filevault_database::FileStore;
use filevault_entity::file::File;

use crate::context::RequestContext;

/// Read-only catalog queries scoped to the caller.
///
/// Store failures degrade to an empty listing and are logged.
#[derive(Clone)]
pub struct FileService {
    files: Arc<dyn FileStore>,
}

impl std::fmt::Debug for FileService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileService").finish()
    }
}

impl FileService {
    /// Creates a new file service.
    pub fn new(files: Arc<dyn FileStore>) -> Self {
        Self { files }
    }

    /// Every record the caller owns, all names and versions.
    pub async fn list_my_files(&self, ctx: &RequestContext) -> Vec<File> {
        self.files
            .find_by_owner(ctx.user_id())
            .await
            .unwrap_or_else(|e| {
                warn!(user_id = %ctx.user_id(), error = %e, "Listing owned files failed");
                Vec::new()
            })
    }

    /// The caller's versions of `name`, highest version first.
    pub async fn list_versions(&self, ctx: &RequestContext, name: &str) -> Vec<File> {
        self.files
            .find_versions(ctx.user_id(), name)
            .await
            .unwrap_or_else(|e| {
                warn!(user_id = %ctx.user_id(), name, error = %e, "Listing versions failed");
                Vec::new()
            })
    }
}
