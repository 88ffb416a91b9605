//! Authenticated caller identity.

use serde::{Deserialize, Serialize};

use filevault_core::types::UserId;

/// The authenticated principal attached to every operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// The caller's user id.
    pub user_id: UserId,
    /// The caller's normalized email. Shares are matched against it.
    pub email: String,
}

impl Identity {
    /// Create an identity.
    pub fn new(user_id: UserId, email: impl Into<String>) -> Self {
        Self {
            user_id,
            email: email.into(),
        }
    }
}
