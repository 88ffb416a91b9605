//! Session issuing over the credential store.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use filevault_core::config::AuthConfig;
use filevault_core::error::AppError;
use filevault_database::UserStore;
use filevault_entity::user::{User, normalize_email};

use crate::identity::Identity;
use crate::jwt::{JwtDecoder, JwtEncoder};
use crate::password::PasswordHasher;

/// Message for both unknown email and wrong password.
const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginResult {
    /// Signed bearer token.
    pub token: String,
    /// When the token stops being accepted.
    pub expires_at: DateTime<Utc>,
    /// The authenticated user.
    pub user: User,
}

/// Issues bearer tokens for valid credentials and resolves tokens back to
/// identities.
#[derive(Clone)]
pub struct SessionManager {
    encoder: Arc<JwtEncoder>,
    decoder: Arc<JwtDecoder>,
    users: Arc<dyn UserStore>,
    hasher: Arc<PasswordHasher>,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("encoder", &self.encoder)
            .finish()
    }
}

impl SessionManager {
    /// Creates a session manager over the given credential store.
    ///
    /// Fails on an unusable token lifetime.
    pub fn new(
        config: &AuthConfig,
        users: Arc<dyn UserStore>,
        hasher: Arc<PasswordHasher>,
    ) -> Result<Self, AppError> {
        Ok(Self {
            encoder: Arc::new(JwtEncoder::new(config)?),
            decoder: Arc::new(JwtDecoder::new(config)),
            users,
            hasher,
        })
    }

    /// Check credentials and issue a token.
    ///
    /// Unknown email and wrong password fail identically.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResult, AppError> {
        let email = normalize_email(email);

        let Some(user) = self.users.find_by_email(&email).await? else {
            warn!(email = %email, "Login failed: unknown email");
            return Err(AppError::authentication(INVALID_CREDENTIALS));
        };

        if !self.hasher.verify_password(password, &user.password_hash)? {
            warn!(user_id = %user.id, "Login failed: wrong password");
            return Err(AppError::authentication(INVALID_CREDENTIALS));
        }

        let (token, expires_at) = self.encoder.issue(user.id, &user.email)?;
        info!(user_id = %user.id, "User logged in");

        Ok(LoginResult {
            token,
            expires_at,
            user,
        })
    }

    /// Verify a bearer token and return the identity it carries.
    pub fn authenticate(&self, token: &str) -> Result<Identity, AppError> {
        self.decoder.decode(token).map(|claims| claims.identity())
    }
}
