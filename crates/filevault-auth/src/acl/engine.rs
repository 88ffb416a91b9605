//! Access rules for download, upload-new-version and share.
//!
//! Share permissions are matched by exact equality: a `write` share never
//! grants download and a `read` share never grants upload.

use filevault_entity::file::File;
use filevault_entity::share::{Share, SharePermission};

use super::decision::{AccessDecision, DenyReason, Operation};
use crate::identity::Identity;

/// Whether any share targets `file` for `identity` with exactly `permission`.
fn has_share(identity: &Identity, file: &File, shares: &[Share], permission: SharePermission) -> bool {
    shares.iter().any(|s| {
        s.file_id == file.id && s.shared_with == identity.email && s.permission == permission
    })
}

/// Decide whether `identity` may download this exact record.
pub fn can_download(identity: &Identity, file: &File, shares: &[Share]) -> AccessDecision {
    if file.is_owned_by(identity.user_id)
        || has_share(identity, file, shares, SharePermission::Read)
    {
        AccessDecision::Allow
    } else {
        AccessDecision::Deny(DenyReason::NoDownloadPermission)
    }
}

/// Decide whether `identity` may record a new version after `latest`.
///
/// A name with no prior record is always allowed.
pub fn can_upload_version(
    identity: &Identity,
    latest: Option<&File>,
    shares: &[Share],
) -> AccessDecision {
    match latest {
        None => AccessDecision::Allow,
        Some(file) if file.is_owned_by(identity.user_id) => AccessDecision::Allow,
        Some(file) if has_share(identity, file, shares, SharePermission::Write) => {
            AccessDecision::Allow
        }
        Some(_) => AccessDecision::Deny(DenyReason::NoUploadPermission),
    }
}

/// Decide whether `identity` may share this record.
pub fn can_share(identity: &Identity, file: &File) -> AccessDecision {
    if file.is_owned_by(identity.user_id) {
        AccessDecision::Allow
    } else {
        AccessDecision::Deny(DenyReason::NotOwner)
    }
}

/// Dispatch on `operation`.
///
/// `file` is the target record; for [`Operation::UploadNewVersion`] it is
/// the latest existing version, or `None` for a new name. Download and share
/// without a target record are denied.
pub fn authorize(
    identity: &Identity,
    operation: Operation,
    file: Option<&File>,
    shares: &[Share],
) -> AccessDecision {
    match (operation, file) {
        (Operation::UploadNewVersion, latest) => can_upload_version(identity, latest, shares),
        (Operation::Download, Some(file)) => can_download(identity, file, shares),
        (Operation::Download, None) => AccessDecision::Deny(DenyReason::NoDownloadPermission),
        (Operation::Share, Some(file)) => can_share(identity, file),
        (Operation::Share, None) => AccessDecision::Deny(DenyReason::NotOwner),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use filevault_core::error::ErrorKind;
    use filevault_core::types::{FileId, ShareId, UserId};

    fn identity(email: &str) -> Identity {
        Identity::new(UserId::new(), email)
    }

    fn file_owned_by(owner: &Identity, version: i32) -> File {
        File {
            id: FileId::new(),
            name: "report.txt".to_string(),
            storage_key: format!("{}-v{version}-report.txt", FileId::new()),
            owner_id: owner.user_id,
            version,
            is_public: false,
            size_bytes: 5,
            content_type: None,
            created_at: Utc::now(),
        }
    }

    fn share(file: &File, email: &str, permission: SharePermission) -> Share {
        Share {
            id: ShareId::new(),
            file_id: file.id,
            shared_with: email.to_string(),
            permission,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_owner_download_always_allowed() {
        let owner = identity("a@x.com");
        let file = file_owned_by(&owner, 1);
        assert_eq!(can_download(&owner, &file, &[]), AccessDecision::Allow);

        // Unrelated shares never take the owner's access away.
        let other = share(&file, "b@x.com", SharePermission::Write);
        assert!(can_download(&owner, &file, &[other]).is_allowed());
    }

    #[test]
    fn test_non_owner_without_share_denied() {
        let owner = identity("a@x.com");
        let stranger = identity("c@x.com");
        let file = file_owned_by(&owner, 1);

        let decision = can_download(&stranger, &file, &[]);
        assert_eq!(
            decision,
            AccessDecision::Deny(DenyReason::NoDownloadPermission)
        );
        let err = decision.into_result().unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);
        assert_eq!(err.message, "No permission to download");
    }

    #[test]
    fn test_read_share_allows_download() {
        let owner = identity("a@x.com");
        let reader = identity("b@x.com");
        let file = file_owned_by(&owner, 1);
        let shares = [share(&file, "b@x.com", SharePermission::Read)];

        assert!(can_download(&reader, &file, &shares).is_allowed());
    }

    #[test]
    fn test_write_share_does_not_imply_read() {
        let owner = identity("a@x.com");
        let writer = identity("b@x.com");
        let file = file_owned_by(&owner, 1);
        let shares = [share(&file, "b@x.com", SharePermission::Write)];

        assert!(!can_download(&writer, &file, &shares).is_allowed());
    }

    #[test]
    fn test_share_binds_to_exact_version() {
        let owner = identity("a@x.com");
        let reader = identity("b@x.com");
        let v1 = file_owned_by(&owner, 1);
        let v2 = file_owned_by(&owner, 2);
        let shares = [share(&v1, "b@x.com", SharePermission::Read)];

        assert!(can_download(&reader, &v1, &shares).is_allowed());
        assert!(!can_download(&reader, &v2, &shares).is_allowed());
    }

    #[test]
    fn test_share_to_other_recipient_ignored() {
        let owner = identity("a@x.com");
        let reader = identity("b@x.com");
        let file = file_owned_by(&owner, 1);
        let shares = [share(&file, "c@x.com", SharePermission::Read)];

        assert!(!can_download(&reader, &file, &shares).is_allowed());
    }

    #[test]
    fn test_upload_first_version_allowed() {
        let user = identity("a@x.com");
        assert!(can_upload_version(&user, None, &[]).is_allowed());
    }

    #[test]
    fn test_upload_by_owner_allowed() {
        let owner = identity("a@x.com");
        let latest = file_owned_by(&owner, 3);
        assert!(can_upload_version(&owner, Some(&latest), &[]).is_allowed());
    }

    #[test]
    fn test_upload_by_non_owner_requires_write_share() {
        let owner = identity("a@x.com");
        let other = identity("b@x.com");
        let latest = file_owned_by(&owner, 1);

        assert_eq!(
            can_upload_version(&other, Some(&latest), &[]),
            AccessDecision::Deny(DenyReason::NoUploadPermission)
        );

        let read_only = [share(&latest, "b@x.com", SharePermission::Read)];
        assert!(!can_upload_version(&other, Some(&latest), &read_only).is_allowed());

        let writable = [share(&latest, "b@x.com", SharePermission::Write)];
        assert!(can_upload_version(&other, Some(&latest), &writable).is_allowed());
    }

    #[test]
    fn test_only_owner_may_share() {
        let owner = identity("a@x.com");
        let other = identity("b@x.com");
        let file = file_owned_by(&owner, 1);

        assert!(can_share(&owner, &file).is_allowed());
        let err = can_share(&other, &file).into_result().unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);
        assert_eq!(err.message, "Not allowed");
    }

    #[test]
    fn test_authorize_dispatch() {
        let owner = identity("a@x.com");
        let other = identity("b@x.com");
        let file = file_owned_by(&owner, 1);

        assert!(authorize(&owner, Operation::Download, Some(&file), &[]).is_allowed());
        assert!(authorize(&other, Operation::UploadNewVersion, None, &[]).is_allowed());
        assert!(!authorize(&other, Operation::Share, Some(&file), &[]).is_allowed());
        assert!(!authorize(&owner, Operation::Download, None, &[]).is_allowed());
    }
}
