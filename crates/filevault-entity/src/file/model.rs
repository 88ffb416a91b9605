//! File entity model.
//!
//! One row per stored version. Rows sharing `(owner_id, name)` form the
//! version history of that name; versions start at 1 and are never reused.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use filevault_core::types::{FileId, UserId};

/// Maximum accepted length of a file name, in characters.
pub const MAX_FILE_NAME_LEN: usize = 255;

/// One stored version of a named file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct File {
    /// Unique record identifier.
    pub id: FileId,
    /// User-visible file name.
    pub name: String,
    /// Key of the blob in the object store. Unique across records.
    pub storage_key: String,
    /// The uploading user.
    pub owner_id: UserId,
    /// Version number within `(owner_id, name)`, starting at 1.
    pub version: i32,
    /// Carried but not consulted by any access decision.
    pub is_public: bool,
    /// Blob size in bytes.
    pub size_bytes: i64,
    /// MIME type reported at upload, if any.
    pub content_type: Option<String>,
    /// When this version was recorded.
    pub created_at: DateTime<Utc>,
}

impl File {
    /// Whether the given user owns this record.
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.owner_id == user_id
    }
}

/// Data required to record a new file version.
#[derive(Debug, Clone)]
pub struct CreateFile {
    /// User-visible file name.
    pub name: String,
    /// Key of the already-written blob.
    pub storage_key: String,
    /// The uploading user.
    pub owner_id: UserId,
    /// Assigned version number.
    pub version: i32,
    /// Blob size in bytes.
    pub size_bytes: i64,
    /// MIME type reported at upload.
    pub content_type: Option<String>,
}
