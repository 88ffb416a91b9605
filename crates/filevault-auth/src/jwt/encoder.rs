//! JWT token creation.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use filevault_core::config::AuthConfig;
use filevault_core::error::AppError;
use filevault_core::types::UserId;

use super::claims::Claims;

/// Creates HS256-signed bearer tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    encoding_key: EncodingKey,
    ttl: Duration,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder").field("ttl", &self.ttl).finish()
    }
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    ///
    /// Fails when `token_ttl_hours` does not fit a timestamp offset.
    pub fn new(config: &AuthConfig) -> Result<Self, AppError> {
        let ttl = i64::try_from(config.token_ttl_hours)
            .ok()
            .and_then(Duration::try_hours)
            .filter(|ttl| Utc::now().checked_add_signed(*ttl).is_some())
            .ok_or_else(|| {
                AppError::configuration(format!(
                    "auth.token_ttl_hours out of range: {}",
                    config.token_ttl_hours
                ))
            })?;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            ttl,
        })
    }

    /// Issue a token for the given user.
    pub fn issue(&self, user_id: UserId, email: &str) -> Result<(String, DateTime<Utc>), AppError> {
        let now = Utc::now();
        let exp = now
            .checked_add_signed(self.ttl)
            .ok_or_else(|| AppError::configuration("Token expiry overflows the clock"))?;

        let claims = Claims {
            sub: user_id,
            email: email.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
            jti: Uuid::new_v4(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode token: {e}")))?;

        Ok((token, exp))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use filevault_core::error::ErrorKind;

    fn ttl_config(hours: u64) -> AuthConfig {
        AuthConfig {
            jwt_secret: "s".to_string(),
            token_ttl_hours: hours,
        }
    }

    #[test]
    fn test_ttl_sets_expiry() {
        let encoder = JwtEncoder::new(&ttl_config(2)).unwrap();
        let before = Utc::now();
        let (_, exp) = encoder.issue(UserId::new(), "a@x.com").unwrap();
        assert!(exp >= before + Duration::hours(2));
        assert!(exp <= Utc::now() + Duration::hours(2));
    }

    #[test]
    fn test_out_of_range_ttl_is_configuration_error() {
        for hours in [u64::MAX, i64::MAX as u64, 10_000_000_000] {
            let err = JwtEncoder::new(&ttl_config(hours)).unwrap_err();
            assert_eq!(err.kind, ErrorKind::Configuration);
        }
    }
}
