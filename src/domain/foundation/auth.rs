//! Authentication types for the domain layer.
//!
//! These types represent an authenticated dashboard user. They have no
//! adapter dependencies - the session store populates them through the
//! `SessionValidator` port.

use super::UserId;
use thiserror::Error;

/// Authenticated user attached to a validated session token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// The unique user identifier.
    pub id: UserId,

    /// Username chosen at setup.
    pub username: String,
}

impl AuthenticatedUser {
    /// Creates a new authenticated user.
    pub fn new(id: UserId, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
        }
    }
}

/// Authentication errors that can occur during session validation.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// The session token is missing, unknown, or has been revoked.
    #[error("Invalid or expired session")]
    InvalidSession,

    /// The session has expired (separate from InvalidSession for specific handling).
    #[error("Session expired")]
    SessionExpired,

    /// Session is valid but the user no longer exists.
    #[error("User not found")]
    UserNotFound,

    /// The credential check itself failed (hashing error, storage error).
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    /// Creates a service unavailable error with a message.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Returns true if this error indicates the user should re-authenticate.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidSession | AuthError::SessionExpired | AuthError::UserNotFound
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_session_requires_reauthentication() {
        assert!(AuthError::InvalidSession.requires_reauthentication());
        assert!(AuthError::SessionExpired.requires_reauthentication());
    }

    #[test]
    fn service_unavailable_does_not_require_reauthentication() {
        let err = AuthError::service_unavailable("db down");
        assert!(!err.requires_reauthentication());
    }
}
