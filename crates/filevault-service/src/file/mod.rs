//! File services: versioned upload, download and catalog listings.

pub mod download;
pub mod service;
pub mod upload;
pub mod version;

pub use download::{DownloadResult, DownloadService};
pub use service::FileService;
pub use upload::{UploadFile, UploadService};
pub use version::{VersionPlan, VersionResolver};
