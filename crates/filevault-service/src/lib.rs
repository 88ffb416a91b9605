//! # filevault-service
//!
//! Use-case orchestration for FileVault. Each service is constructed with
//! its collaborators behind `Arc`s and every operation takes an explicit
//! [`RequestContext`] naming the acting user.

pub mod context;
pub mod file;
pub mod share;
pub mod user;

#[cfg(test)]
pub(crate) mod testing;

pub use context::RequestContext;
pub use file::{DownloadResult, DownloadService, FileService, UploadFile, UploadService, VersionResolver};
pub use share::{CreateShareParams, ShareService};
pub use user::{RegisterUser, UserService};
