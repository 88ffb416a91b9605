//! Versioning resolver.
//!
//! Decides the next version number and storage key for an upload under a
//! given name. Version assignment for one `(owner, name)` is serialized
//! through a keyed async lock; the catalog's unique constraint on
//! `(owner_id, name, version)` covers multiple processes.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::debug;
use uuid::Uuid;

use filevault_auth::{Identity, acl};
use filevault_core::error::AppError;
use filevault_core::types::UserId;
use filevault_database::{FileStore, ShareStore};
use filevault_entity::file::{CreateFile, File, MAX_FILE_NAME_LEN};

type LockKey = (UserId, String);

/// Registry of per-`(owner, name)` mutexes. Idle entries are removed.
#[derive(Debug, Default)]
pub struct VersionLocks {
    locks: DashMap<LockKey, Arc<Mutex<()>>>,
}

impl VersionLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive version assignment on `(owner, name)`.
    pub async fn acquire(self: &Arc<Self>, owner: UserId, name: &str) -> VersionGuard {
        let key = (owner, name.to_string());
        let mutex = self.locks.entry(key.clone()).or_default().clone();
        let guard = mutex.lock_owned().await;
        VersionGuard {
            guard: Some(guard),
            key,
            locks: Arc::clone(self),
        }
    }

    /// Number of names currently locked or awaited.
    pub fn active(&self) -> usize {
        self.locks.len()
    }
}

/// Held while a version is being assigned and recorded.
#[must_use]
pub struct VersionGuard {
    guard: Option<OwnedMutexGuard<()>>,
    key: LockKey,
    locks: Arc<VersionLocks>,
}

impl Drop for VersionGuard {
    fn drop(&mut self) {
        // Release before checking so our own reference is gone.
        self.guard.take();
        self.locks
            .locks
            .remove_if(&self.key, |_, mutex| Arc::strong_count(mutex) == 1);
    }
}

/// The outcome of resolving an upload against the existing history.
#[derive(Debug, Clone)]
pub struct VersionPlan {
    /// Assigned version number.
    pub version: i32,
    /// Key under which the payload is to be stored.
    pub storage_key: String,
    /// Catalog record to persist after the payload is stored.
    pub record: CreateFile,
}

/// Resolves the next version for an upload.
#[derive(Clone)]
pub struct VersionResolver {
    files: Arc<dyn FileStore>,
    shares: Arc<dyn ShareStore>,
    locks: Arc<VersionLocks>,
}

impl std::fmt::Debug for VersionResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VersionResolver")
            .field("locks", &self.locks)
            .finish()
    }
}

impl VersionResolver {
    /// Creates a new resolver.
    pub fn new(files: Arc<dyn FileStore>, shares: Arc<dyn ShareStore>) -> Self {
        Self {
            files,
            shares,
            locks: Arc::new(VersionLocks::new()),
        }
    }

    /// Serialize version assignment for `(owner, name)` until the guard drops.
    pub async fn lock(&self, owner: UserId, name: &str) -> VersionGuard {
        self.locks.acquire(owner, name).await
    }

    /// Resolve the version, storage key and catalog record for an upload.
    ///
    /// The latest-version lookup is scoped to the uploader's own records,
    /// so an upload never extends another user's history.
    pub async fn resolve(
        &self,
        identity: &Identity,
        name: &str,
        size_bytes: i64,
        content_type: Option<String>,
    ) -> Result<VersionPlan, AppError> {
        validate_file_name(name)?;

        let latest = self.files.find_latest(identity.user_id, name).await?;
        let shares = match &latest {
            Some(file) if !file.is_owned_by(identity.user_id) => {
                self.shares
                    .find_for_file_and_recipient(file.id, &identity.email)
                    .await?
            }
            _ => Vec::new(),
        };
        acl::can_upload_version(identity, latest.as_ref(), &shares).into_result()?;

        let version = next_version(latest.as_ref())?;
        let storage_key = storage_key(version, name);
        debug!(user_id = %identity.user_id, name, version, "Resolved upload version");

        Ok(VersionPlan {
            version,
            storage_key: storage_key.clone(),
            record: CreateFile {
                name: name.to_string(),
                storage_key,
                owner_id: identity.user_id,
                version,
                size_bytes,
                content_type,
            },
        })
    }
}

fn next_version(latest: Option<&File>) -> Result<i32, AppError> {
    match latest {
        None => Ok(1),
        Some(file) => file
            .version
            .checked_add(1)
            .ok_or_else(|| AppError::conflict(format!("Version limit reached for '{}'", file.name))),
    }
}

/// Reject names that cannot be stored.
pub fn validate_file_name(name: &str) -> Result<(), AppError> {
    if name.trim().is_empty() {
        return Err(AppError::validation("File name must not be empty"));
    }
    if name.chars().count() > MAX_FILE_NAME_LEN {
        return Err(AppError::validation(format!(
            "File name exceeds {MAX_FILE_NAME_LEN} characters"
        )));
    }
    if name.contains('\0') {
        return Err(AppError::validation("File name must not contain NUL"));
    }
    Ok(())
}

/// Upper bound on the bytes of the name carried in a storage key.
///
/// Keeps keys under the 255-byte file name limit of common filesystems.
const STORAGE_KEY_NAME_BYTES: usize = 128;

/// Build a globally unique storage key `{uuid}-v{version}-{name}`.
///
/// Path separators in the name are replaced so the key is a flat name, and
/// the name is cut at a character boundary after `STORAGE_KEY_NAME_BYTES`.
/// The uuid alone makes the key unique.
pub fn storage_key(version: i32, name: &str) -> String {
    let mut sanitized = String::with_capacity(name.len().min(STORAGE_KEY_NAME_BYTES));
    for c in name.chars() {
        if sanitized.len() + c.len_utf8() > STORAGE_KEY_NAME_BYTES {
            break;
        }
        sanitized.push(if matches!(c, '/' | '\\') { '_' } else { c });
    }
    format!("{}-v{version}-{sanitized}", Uuid::new_v4())
}

#[cfg(test)]
mod tests {
    use super::*;
    use filevault_core::error::ErrorKind;
    use filevault_database::memory::{InMemoryFileStore, InMemoryShareStore};
    use filevault_entity::share::{CreateShare, SharePermission};
    use std::time::Duration;

    fn resolver() -> (VersionResolver, Arc<InMemoryFileStore>, Arc<InMemoryShareStore>) {
        let files = Arc::new(InMemoryFileStore::new());
        let shares = Arc::new(InMemoryShareStore::new());
        (
            VersionResolver::new(files.clone(), shares.clone()),
            files,
            shares,
        )
    }

    #[test]
    fn test_storage_key_format() {
        let key = storage_key(3, "dir/sub\\report.txt");
        let (uuid, rest) = key.split_at(36);
        assert!(Uuid::parse_str(uuid).is_ok());
        assert_eq!(rest, "-v3-dir_sub_report.txt");
        assert_ne!(storage_key(1, "a"), storage_key(1, "a"));
    }

    #[test]
    fn test_storage_key_bounds_long_names() {
        let name = format!("{}.txt", "é".repeat(MAX_FILE_NAME_LEN - 4));
        assert!(validate_file_name(&name).is_ok());

        let key = storage_key(12, &name);
        let carried = &key[36 + "-v12-".len()..];
        assert!(carried.len() <= STORAGE_KEY_NAME_BYTES);
        assert!(carried.chars().all(|c| c == 'é'));
        assert!(key.len() < 255);
    }

    #[test]
    fn test_file_name_validation() {
        assert!(validate_file_name("report.txt").is_ok());
        assert!(validate_file_name("").is_err());
        assert!(validate_file_name("   ").is_err());
        assert!(validate_file_name(&"x".repeat(MAX_FILE_NAME_LEN)).is_ok());
        assert!(validate_file_name(&"x".repeat(MAX_FILE_NAME_LEN + 1)).is_err());
    }

    #[tokio::test]
    async fn test_first_upload_is_version_one() {
        let (resolver, files, _) = resolver();
        let alice = Identity::new(UserId::new(), "a@x.com");

        let plan = resolver.resolve(&alice, "report.txt", 5, None).await.unwrap();
        assert_eq!(plan.version, 1);
        assert!(plan.storage_key.ends_with("-v1-report.txt"));
        assert_eq!(plan.record.owner_id, alice.user_id);

        files.create(&plan.record).await.unwrap();
        let plan = resolver.resolve(&alice, "report.txt", 5, None).await.unwrap();
        assert_eq!(plan.version, 2);
    }

    #[tokio::test]
    async fn test_history_is_scoped_to_uploader() {
        let (resolver, files, shares) = resolver();
        let alice = Identity::new(UserId::new(), "a@x.com");
        let bob = Identity::new(UserId::new(), "b@x.com");

        let plan = resolver.resolve(&alice, "report.txt", 5, None).await.unwrap();
        let v1 = files.create(&plan.record).await.unwrap();
        shares
            .create(&CreateShare {
                file_id: v1.id,
                shared_with: bob.email.clone(),
                permission: SharePermission::Write,
            })
            .await
            .unwrap();

        // Bob starts his own history even with a write share on Alice's record.
        let plan = resolver.resolve(&bob, "report.txt", 5, None).await.unwrap();
        assert_eq!(plan.version, 1);
        assert_eq!(plan.record.owner_id, bob.user_id);
    }

    #[tokio::test]
    async fn test_invalid_name_rejected() {
        let (resolver, _, _) = resolver();
        let alice = Identity::new(UserId::new(), "a@x.com");
        let err = resolver.resolve(&alice, "", 0, None).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_lock_serializes_same_name_only() {
        let (resolver, _, _) = resolver();
        let owner = UserId::new();

        let held = resolver.lock(owner, "a.txt").await;
        // A different name is independent.
        let other = resolver.lock(owner, "b.txt").await;
        drop(other);

        let blocked = tokio::time::timeout(Duration::from_millis(50), resolver.lock(owner, "a.txt")).await;
        assert!(blocked.is_err());

        drop(held);
        let reacquired =
            tokio::time::timeout(Duration::from_millis(50), resolver.lock(owner, "a.txt")).await;
        assert!(reacquired.is_ok());
    }

    #[tokio::test]
    async fn test_idle_locks_are_removed() {
        let (resolver, _, _) = resolver();
        let guard = resolver.lock(UserId::new(), "a.txt").await;
        assert_eq!(resolver.locks.active(), 1);
        drop(guard);
        assert_eq!(resolver.locks.active(), 0);
    }
}
