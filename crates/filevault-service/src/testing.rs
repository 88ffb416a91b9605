//! Shared fixtures for service tests.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;

use filevault_auth::Identity;
use filevault_core::error::AppError;
use filevault_core::result::AppResult;
use filevault_core::traits::storage::{ByteStream, ObjectStore};
use filevault_core::types::{FileId, UserId};
use filevault_database::memory::{InMemoryFileStore, InMemoryShareStore, InMemoryUserStore};
use filevault_database::{FileStore, ShareStore, UserStore};
use filevault_entity::file::{CreateFile, File};
use filevault_entity::share::{CreateShare, Share};
use filevault_entity::user::CreateUser;
use filevault_storage::providers::MemoryObjectStore;

use crate::context::RequestContext;
use crate::file::{DownloadService, FileService, UploadFile, UploadService, VersionResolver};
use crate::share::ShareService;

/// Object store whose writes always fail.
#[derive(Debug)]
pub struct FailingObjectStore;

#[async_trait]
impl ObjectStore for FailingObjectStore {
    fn provider_type(&self) -> &str {
        "failing"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(false)
    }

    async fn put(&self, key: &str, _data: Bytes) -> AppResult<()> {
        Err(AppError::storage(format!("Refusing to write {key}")))
    }

    async fn get_stream(&self, key: &str) -> AppResult<ByteStream> {
        Err(AppError::not_found(format!("Object not found: {key}")))
    }
}

fn unavailable() -> AppError {
    AppError::database("Catalog unavailable")
}

/// File catalog that fails every call.
#[derive(Debug)]
pub struct UnavailableFileStore;

#[async_trait]
impl FileStore for UnavailableFileStore {
    async fn create(&self, _data: &CreateFile) -> AppResult<File> {
        Err(unavailable())
    }

    async fn find_by_id(&self, _id: FileId) -> AppResult<Option<File>> {
        Err(unavailable())
    }

    async fn find_by_ids(&self, _ids: &[FileId]) -> AppResult<Vec<File>> {
        Err(unavailable())
    }

    async fn find_latest(&self, _owner_id: UserId, _name: &str) -> AppResult<Option<File>> {
        Err(unavailable())
    }

    async fn find_by_owner(&self, _owner_id: UserId) -> AppResult<Vec<File>> {
        Err(unavailable())
    }

    async fn find_versions(&self, _owner_id: UserId, _name: &str) -> AppResult<Vec<File>> {
        Err(unavailable())
    }
}

/// Share registry that fails every call.
#[derive(Debug)]
pub struct UnavailableShareStore;

#[async_trait]
impl ShareStore for UnavailableShareStore {
    async fn create(&self, _data: &CreateShare) -> AppResult<Share> {
        Err(unavailable())
    }

    async fn find_for_file_and_recipient(
        &self,
        _file_id: FileId,
        _email: &str,
    ) -> AppResult<Vec<Share>> {
        Err(unavailable())
    }

    async fn find_by_recipient(&self, _email: &str) -> AppResult<Vec<Share>> {
        Err(unavailable())
    }
}

/// File catalog whose inserts always lose the version race, as when another
/// process records the same `(owner, name, version)` first. Reads go to an
/// in-memory store.
#[derive(Debug, Default)]
pub struct ConflictingFileStore {
    pub inner: InMemoryFileStore,
}

#[async_trait]
impl FileStore for ConflictingFileStore {
    async fn create(&self, data: &CreateFile) -> AppResult<File> {
        Err(AppError::retryable_conflict(format!(
            "Version {} of '{}' was recorded concurrently",
            data.version, data.name
        )))
    }

    async fn find_by_id(&self, id: FileId) -> AppResult<Option<File>> {
        self.inner.find_by_id(id).await
    }

    async fn find_by_ids(&self, ids: &[FileId]) -> AppResult<Vec<File>> {
        self.inner.find_by_ids(ids).await
    }

    async fn find_latest(&self, owner_id: UserId, name: &str) -> AppResult<Option<File>> {
        self.inner.find_latest(owner_id, name).await
    }

    async fn find_by_owner(&self, owner_id: UserId) -> AppResult<Vec<File>> {
        self.inner.find_by_owner(owner_id).await
    }

    async fn find_versions(&self, owner_id: UserId, name: &str) -> AppResult<Vec<File>> {
        self.inner.find_versions(owner_id, name).await
    }
}

/// A context for a user that exists only as an identity.
pub fn stranger(email: &str) -> RequestContext {
    RequestContext::new(Identity::new(UserId::new(), email))
}

/// Services wired over in-memory stores.
pub struct Harness {
    pub users: Arc<InMemoryUserStore>,
    pub files: Arc<InMemoryFileStore>,
    pub shares: Arc<InMemoryShareStore>,
    pub objects: Arc<MemoryObjectStore>,
    pub resolver: VersionResolver,
    pub upload: UploadService,
    pub download: DownloadService,
    pub files_svc: FileService,
    pub share: ShareService,
}

impl Harness {
    pub fn new() -> Self {
        let objects = Arc::new(MemoryObjectStore::new());
        Self::build(objects.clone(), objects)
    }

    pub fn with_objects(store: Arc<dyn ObjectStore>) -> Self {
        Self::build(Arc::new(MemoryObjectStore::new()), store)
    }

    fn build(objects: Arc<MemoryObjectStore>, store: Arc<dyn ObjectStore>) -> Self {
        let users = Arc::new(InMemoryUserStore::new());
        let files = Arc::new(InMemoryFileStore::new());
        let shares = Arc::new(InMemoryShareStore::new());
        let resolver = VersionResolver::new(files.clone(), shares.clone());

        Self {
            upload: UploadService::new(files.clone(), store.clone(), resolver.clone(), 1 << 20),
            download: DownloadService::new(files.clone(), shares.clone(), store),
            files_svc: FileService::new(files.clone()),
            share: ShareService::new(files.clone(), shares.clone(), users.clone()),
            resolver,
            users,
            files,
            shares,
            objects,
        }
    }

    /// Register a user directly in the store and return a context for them.
    pub async fn user(&self, email: &str) -> RequestContext {
        let user = self
            .users
            .create(&CreateUser {
                email: email.to_string(),
                name: email.to_string(),
                password_hash: "unused".to_string(),
            })
            .await
            .unwrap();
        RequestContext::new(Identity::new(user.id, user.email))
    }

    /// Upload `body` as the next version of `name`.
    pub async fn store_file(&self, ctx: &RequestContext, name: &str, body: &'static [u8]) -> File {
        self.upload
            .upload(
                ctx,
                UploadFile {
                    name: name.to_string(),
                    content_type: None,
                    data: Bytes::from_static(body),
                },
            )
            .await
            .unwrap()
    }
}
