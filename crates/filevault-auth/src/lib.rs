//! # filevault-auth
//!
//! Authentication and authorization for FileVault.
//!
//! ## Modules
//!
//! - `acl`: the access control engine deciding download, upload and share
//! - `jwt`: bearer token issuing and verification
//! - `password`: Argon2id password hashing
//! - `session`: login and token authentication over the credential store

pub mod acl;
pub mod identity;
pub mod jwt;
pub mod password;
pub mod session;

pub use acl::{AccessDecision, DenyReason, Operation};
pub use identity::Identity;
pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use password::PasswordHasher;
pub use session::{LoginResult, SessionManager};
