//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use filevault_core::types::UserId;
use filevault_entity::file::File;
use filevault_entity::share::Share;
use filevault_entity::user::User;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Public user profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    /// User ID.
    pub id: UserId,
    /// Email.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Registration time.
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            created_at: user.created_at,
        }
    }
}

/// `{ user }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserEnvelope {
    /// The registered user.
    pub user: UserResponse,
}

/// Login response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Bearer token.
    pub token: String,
    /// Token expiration.
    pub expires_at: DateTime<Utc>,
    /// User info.
    pub user: UserResponse,
}

/// `{ file }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileEnvelope {
    /// The stored file record.
    pub file: File,
}

/// `{ files }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilesEnvelope {
    /// File records.
    pub files: Vec<File>,
}

/// `{ share }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareEnvelope {
    /// The created share.
    pub share: Share,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `ok` or `degraded`.
    pub status: String,
    /// Server version.
    pub version: String,
    /// Catalog store status.
    pub database: ComponentHealth,
    /// Object store status.
    pub storage: ComponentHealth,
}

/// Status of one backing component.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentHealth {
    /// Provider name.
    pub provider: String,
    /// Whether the component answered its health check.
    pub healthy: bool,
}
