//! User registration service.

use std::sync::Arc;

use tracing::info;
use validator::Validate;

use filevault_auth::PasswordHasher;
use filevault_core::error::AppError;
use filevault_database::UserStore;
use filevault_entity::user::{CreateUser, User, normalize_email};

/// Input for registering a new user.
#[derive(Debug, Clone, Validate)]
pub struct RegisterUser {
    /// Email address; normalized before storage.
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    /// Plaintext password.
    #[validate(length(min = 1, message = "Password must not be empty"))]
    pub password: String,
    /// Display name.
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,
}

/// Registers users in the credential store.
#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserStore>,
    hasher: Arc<PasswordHasher>,
}

impl std::fmt::Debug for UserService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserService").finish()
    }
}

impl UserService {
    /// Creates a new user service.
    pub fn new(users: Arc<dyn UserStore>, hasher: Arc<PasswordHasher>) -> Self {
        Self { users, hasher }
    }

    /// Register a new user.
    ///
    /// Fails with `Validation` on malformed input and `Conflict` when the
    /// normalized email is already registered.
    pub async fn register(&self, input: RegisterUser) -> Result<User, AppError> {
        let input = RegisterUser {
            email: normalize_email(&input.email),
            name: input.name.trim().to_string(),
            ..input
        };
        input
            .validate()
            .map_err(|e| AppError::validation(format!("Invalid registration: {e}")))?;

        if self.users.find_by_email(&input.email).await?.is_some() {
            return Err(AppError::conflict("Email already in use"));
        }

        let password_hash = self.hasher.hash_password(&input.password)?;
        let user = self
            .users
            .create(&CreateUser {
                email: input.email,
                name: input.name,
                password_hash,
            })
            .await?;

        info!(user_id = %user.id, "User registered");
        Ok(user)
    }
}
