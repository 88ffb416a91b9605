//! Share domain entities.

pub mod model;
pub mod permission;

pub use model::{CreateShare, Share};
pub use permission::SharePermission;
