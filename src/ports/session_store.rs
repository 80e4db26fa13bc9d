//! Session Store Port - Opaque bearer-token sessions.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};
use crate::domain::user::User;

/// Port for session issuance and validation.
///
/// Sessions are opaque random tokens presented as `Authorization: Bearer`
/// headers; the HTTP middleware validates them through this port without
/// knowing how they are stored.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Issues a new session for a user and returns the token.
    async fn issue(&self, user: &User) -> Result<String, AuthError>;

    /// Resolves a token to its user, rejecting unknown or expired tokens.
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;

    /// Revokes a session. Unknown tokens are ignored.
    async fn revoke(&self, token: &str);
}
