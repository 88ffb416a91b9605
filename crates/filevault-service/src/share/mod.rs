//! Share registry operations.

pub mod service;

pub use service::{CreateShareParams, ShareService};
