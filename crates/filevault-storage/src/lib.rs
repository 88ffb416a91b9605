//! # filevault-storage
//!
//! Object store providers for FileVault: local filesystem, in-memory, and
//! S3-compatible buckets behind the `s3` feature.

pub mod factory;
pub mod providers;

pub use factory::build_object_store;
