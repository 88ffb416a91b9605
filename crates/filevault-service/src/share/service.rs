//! Share creation and shared-with-me listing.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{info, warn};

use filevault_auth::acl;
use filevault_core::error::AppError;
use filevault_core::types::FileId;
use filevault_database::{FileStore, ShareStore, UserStore};
use filevault_entity::file::File;
use filevault_entity::share::{CreateShare, Share, SharePermission};
use filevault_entity::user::normalize_email;

use crate::context::RequestContext;

/// Input for sharing a file record.
#[derive(Debug, Clone)]
pub struct CreateShareParams {
    /// The exact record (version) to share.
    pub file_id: FileId,
    /// Recipient email; normalized before lookup.
    pub email: String,
    /// Requested permission; missing or empty means read.
    pub permission: Option<String>,
}

/// Creates shares and lists records shared with the caller.
#[derive(Clone)]
pub struct ShareService {
    files: Arc<dyn FileStore>,
    shares: Arc<dyn ShareStore>,
    users: Arc<dyn UserStore>,
}

impl std::fmt::Debug for ShareService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShareService").finish()
    }
}

/// Parse a requested permission, defaulting to read.
pub fn parse_permission(raw: Option<&str>) -> Result<SharePermission, AppError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(SharePermission::default()),
        Some(value) => value.parse().map_err(AppError::validation),
    }
}

impl ShareService {
    /// Creates a new share service.
    pub fn new(
        files: Arc<dyn FileStore>,
        shares: Arc<dyn ShareStore>,
        users: Arc<dyn UserStore>,
    ) -> Self {
        Self {
            files,
            shares,
            users,
        }
    }

    /// Share one record with a registered user.
    ///
    /// Only the record's owner may share it and the recipient must be
    /// registered. No record is written on any failure.
    pub async fn create_share(
        &self,
        ctx: &RequestContext,
        params: CreateShareParams,
    ) -> Result<Share, AppError> {
        let permission = parse_permission(params.permission.as_deref())?;

        let file = self
            .files
            .find_by_id(params.file_id)
            .await?
            .ok_or_else(|| AppError::not_found("File not found"))?;

        if let Err(e) = acl::can_share(&ctx.identity, &file).into_result() {
            warn!(user_id = %ctx.user_id(), file_id = %file.id, "Share denied: not owner");
            return Err(e);
        }

        let recipient = normalize_email(&params.email);
        if self.users.find_by_email(&recipient).await?.is_none() {
            return Err(AppError::not_found("User not found"));
        }

        let share = self
            .shares
            .create(&CreateShare {
                file_id: file.id,
                shared_with: recipient,
                permission,
            })
            .await?;

        info!(
            user_id = %ctx.user_id(),
            file_id = %file.id,
            share_id = %share.id,
            permission = %share.permission,
            "File shared"
        );
        Ok(share)
    }

    /// Every record addressed to the caller by any share, once each.
    ///
    /// Store failures degrade to an empty listing and are logged.
    pub async fn list_shared_with_me(&self, ctx: &RequestContext) -> Vec<File> {
        let shares = match self.shares.find_by_recipient(ctx.email()).await {
            Ok(shares) => shares,
            Err(e) => {
                warn!(user_id = %ctx.user_id(), error = %e, "Listing shares failed");
                return Vec::new();
            }
        };

        let mut seen = HashSet::new();
        let ids: Vec<FileId> = shares
            .into_iter()
            .map(|s| s.file_id)
            .filter(|id| seen.insert(*id))
            .collect();

        self.files.find_by_ids(&ids).await.unwrap_or_else(|e| {
            warn!(user_id = %ctx.user_id(), error = %e, "Listing shared files failed");
            Vec::new()
        })
    }
}
