//! Request context carrying the authenticated identity.

use chrono::{DateTime, Utc};

use filevault_auth::Identity;
use filevault_core::types::UserId;

/// Context for the current authenticated request.
///
/// Built by the HTTP layer from a verified bearer token and passed into
/// every service method so that each operation knows who is acting.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// The authenticated caller.
    pub identity: Identity,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(identity: Identity) -> Self {
        Self {
            identity,
            request_time: Utc::now(),
        }
    }

    /// The caller's user id.
    pub fn user_id(&self) -> UserId {
        self.identity.user_id
    }

    /// The caller's normalized email.
    pub fn email(&self) -> &str {
        &self.identity.email
    }
}
