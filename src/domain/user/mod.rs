//! Dashboard user entity.

use crate::domain::foundation::{Timestamp, UserId, ValidationError};

/// A dashboard user account.
///
/// There is typically exactly one, created through first-run setup.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub password_hash: String,
    pub created_at: Timestamp,
    pub last_login: Option<Timestamp>,
}

impl User {
    /// Creates a new user with the given credentials.
    ///
    /// The password must already be hashed; this type never sees
    /// plaintext passwords.
    pub fn new(
        username: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let username = username.into().trim().to_string();
        if username.len() < 3 {
            return Err(ValidationError::invalid_format(
                "username",
                "must be at least 3 characters",
            ));
        }
        Ok(Self {
            id: UserId::new(),
            username,
            password_hash: password_hash.into(),
            created_at: Timestamp::now(),
            last_login: None,
        })
    }
}
