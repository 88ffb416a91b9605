//! Access control engine.
//!
//! Pure decision logic over an [`Identity`](crate::Identity), a target
//! file record and the share records the caller supplies. No I/O and no
//! caching; every request is evaluated afresh.

pub mod decision;
pub mod engine;

pub use decision::{AccessDecision, DenyReason, Operation};
pub use engine::{authorize, can_download, can_share, can_upload_version};
