//! Store traits over the relational catalog.
//!
//! Services depend on these traits only; the PostgreSQL repositories and
//! the in-memory stores are interchangeable behind them.

use async_trait::async_trait;

use filevault_core::result::AppResult;
use filevault_core::types::{FileId, UserId};
use filevault_entity::file::{CreateFile, File};
use filevault_entity::share::{CreateShare, Share};
use filevault_entity::user::{CreateUser, User};

/// Credential store: registered users keyed by unique email.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Insert a new user. Fails with `Conflict` when the email is taken.
    async fn create(&self, data: &CreateUser) -> AppResult<User>;

    /// Find a user by normalized email.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Find a user by id.
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>>;
}

/// File catalog: one immutable record per stored version.
#[async_trait]
pub trait FileStore: Send + Sync + 'static {
    /// Insert a version record.
    ///
    /// Fails with a retryable `Conflict` when `(owner_id, name, version)`
    /// is already taken.
    async fn create(&self, data: &CreateFile) -> AppResult<File>;

    /// Find a record by id.
    async fn find_by_id(&self, id: FileId) -> AppResult<Option<File>>;

    /// Find all records whose id is in `ids`, newest first.
    async fn find_by_ids(&self, ids: &[FileId]) -> AppResult<Vec<File>>;

    /// The highest version recorded for `(owner_id, name)`.
    async fn find_latest(&self, owner_id: UserId, name: &str) -> AppResult<Option<File>>;

    /// All records owned by a user, by name then version descending.
    async fn find_by_owner(&self, owner_id: UserId) -> AppResult<Vec<File>>;

    /// All versions of `(owner_id, name)`, version descending.
    async fn find_versions(&self, owner_id: UserId, name: &str) -> AppResult<Vec<File>>;
}

/// Share registry: append-only grants keyed by recipient email.
#[async_trait]
pub trait ShareStore: Send + Sync + 'static {
    /// Append a share. Duplicates are accepted.
    async fn create(&self, data: &CreateShare) -> AppResult<Share>;

    /// Shares on one file record addressed to one recipient.
    async fn find_for_file_and_recipient(
        &self,
        file_id: FileId,
        email: &str,
    ) -> AppResult<Vec<Share>>;

    /// Every share addressed to a recipient, oldest first.
    async fn find_by_recipient(&self, email: &str) -> AppResult<Vec<Share>>;
}
