//! Request DTOs.

use serde::Deserialize;

use filevault_core::types::FileId;
use filevault_service::share::CreateShareParams;
use filevault_service::user::RegisterUser;

/// Registration request.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    /// Email address.
    pub email: String,
    /// Password.
    pub password: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
}

impl From<RegisterRequest> for RegisterUser {
    fn from(req: RegisterRequest) -> Self {
        Self {
            email: req.email,
            password: req.password,
            name: req.name,
        }
    }
}

/// Login request.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    /// Email address.
    pub email: String,
    /// Password.
    pub password: String,
}

/// Share request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareRequest {
    /// The file version to share.
    pub file_id: FileId,
    /// Recipient email.
    pub email: String,
    /// `read` or `write`; defaults to `read`.
    #[serde(default)]
    pub permission: Option<String>,
}

impl From<ShareRequest> for CreateShareParams {
    fn from(req: ShareRequest) -> Self {
        Self {
            file_id: req.file_id,
            email: req.email,
            permission: req.permission,
        }
    }
}
