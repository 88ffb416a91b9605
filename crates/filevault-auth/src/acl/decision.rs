//! Decision types produced by the access control engine.

use std::fmt;

use filevault_core::error::AppError;
use filevault_core::result::AppResult;

/// An operation on a file record that requires a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Read the blob of one specific version.
    Download,
    /// Record a new version under the name of an existing record.
    UploadNewVersion,
    /// Grant another user access to a record.
    Share,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Download => f.write_str("download"),
            Self::UploadNewVersion => f.write_str("upload_new_version"),
            Self::Share => f.write_str("share"),
        }
    }
}

/// Why access was denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    /// Not the owner and no read share addressed to the caller.
    NoDownloadPermission,
    /// Not the owner of the latest version and no write share on it.
    NoUploadPermission,
    /// Only the owner may share a record.
    NotOwner,
}

impl DenyReason {
    /// Message surfaced to the caller.
    pub fn message(&self) -> &'static str {
        match self {
            Self::NoDownloadPermission => "No permission to download",
            Self::NoUploadPermission => "No permission to upload new version",
            Self::NotOwner => "Not allowed",
        }
    }
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Outcome of an access check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    /// The operation may proceed.
    Allow,
    /// The operation must not proceed.
    Deny(DenyReason),
}

impl AccessDecision {
    /// Whether the decision is [`AccessDecision::Allow`].
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }

    /// Convert a denial into an `Authorization` error carrying the reason.
    pub fn into_result(self) -> AppResult<()> {
        match self {
            Self::Allow => Ok(()),
            Self::Deny(reason) => Err(AppError::authorization(reason.message())),
        }
    }
}
