//! Object store trait for pluggable blob storage backends.

use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;

use crate::result::AppResult;

/// A byte stream type used for reading blob contents.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, std::io::Error>> + Send>>;

/// Blob storage addressed by opaque keys.
///
/// Keys are produced by the versioning resolver and never reused, so
/// implementations do not need to handle overwrites specially.
/// Implementations live in `filevault-storage`.
#[async_trait]
pub trait ObjectStore: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g. "local", "s3").
    fn provider_type(&self) -> &str;

    /// Check whether the backend is reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Store `data` under `key`.
    ///
    /// Fails with a `Storage` error when the backend rejects the write.
    async fn put(&self, key: &str, data: Bytes) -> AppResult<()>;

    /// Open the blob stored under `key` as a byte stream.
    ///
    /// Fails with `NotFound` when no blob exists for the key.
    async fn get_stream(&self, key: &str) -> AppResult<ByteStream>;
}
