//! Share entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use filevault_core::types::{FileId, ShareId};

use super::permission::SharePermission;

/// A grant of access on a single file record to a recipient email.
///
/// Shares are keyed by email, not by user id, and bind to the exact
/// record (version) they were created on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Share {
    /// Unique share identifier.
    pub id: ShareId,
    /// The shared file record.
    pub file_id: FileId,
    /// Normalized recipient email.
    pub shared_with: String,
    /// Granted permission.
    pub permission: SharePermission,
    /// When the share was created.
    pub created_at: DateTime<Utc>,
}

/// Data required to create a new share.
#[derive(Debug, Clone)]
pub struct CreateShare {
    /// The shared file record.
    pub file_id: FileId,
    /// Normalized recipient email.
    pub shared_with: String,
    /// Granted permission.
    pub permission: SharePermission,
}
