//! In-memory session store.
//!
//! Sessions are opaque random tokens with a fixed TTL, held in process
//! memory. A restart logs everyone out, which is acceptable for a
//! single-instance self-hosted dashboard.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use rand::RngCore;
use tokio::sync::RwLock;

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId};
use crate::domain::user::User;
use crate::ports::SessionStore;

const TOKEN_BYTES: usize = 32;

#[derive(Debug, Clone)]
struct SessionEntry {
    user_id: UserId,
    username: String,
    expires_at: Instant,
}

/// In-memory implementation of SessionStore.
pub struct InMemorySessionStore {
    ttl: Duration,
    sessions: RwLock<HashMap<String, SessionEntry>>,
}

impl InMemorySessionStore {
    /// Creates a session store with the given session lifetime.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    fn generate_token() -> String {
        let mut bytes = [0u8; TOKEN_BYTES];
        rand::thread_rng().fill_bytes(&mut bytes);
        hex::encode(bytes)
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn issue(&self, user: &User) -> Result<String, AuthError> {
        let token = Self::generate_token();
        let entry = SessionEntry {
            user_id: user.id,
            username: user.username.clone(),
            expires_at: Instant::now() + self.ttl,
        };
        self.sessions.write().await.insert(token.clone(), entry);
        Ok(token)
    }

    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let entry = self.sessions.read().await.get(token).cloned();
        match entry {
            Some(entry) if entry.expires_at > Instant::now() => {
                Ok(AuthenticatedUser::new(entry.user_id, &entry.username))
            }
            Some(_) => {
                self.sessions.write().await.remove(token);
                Err(AuthError::SessionExpired)
            }
            None => Err(AuthError::InvalidSession),
        }
    }

    async fn revoke(&self, token: &str) {
        self.sessions.write().await.remove(token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User::new("alice", "hash").unwrap()
    }

    #[tokio::test]
    async fn issued_token_validates() {
        let store = InMemorySessionStore::new(Duration::from_secs(60));
        let user = user();
        let token = store.issue(&user).await.unwrap();

        let authenticated = store.validate(&token).await.unwrap();
        assert_eq!(authenticated.id, user.id);
        assert_eq!(authenticated.username, "alice");
    }

    #[tokio::test]
    async fn tokens_are_unique() {
        let store = InMemorySessionStore::new(Duration::from_secs(60));
        let user = user();
        let t1 = store.issue(&user).await.unwrap();
        let t2 = store.issue(&user).await.unwrap();
        assert_ne!(t1, t2);
        assert_eq!(t1.len(), TOKEN_BYTES * 2);
    }

    #[tokio::test]
    async fn unknown_token_is_rejected() {
        let store = InMemorySessionStore::new(Duration::from_secs(60));
        let result = store.validate("bogus").await;
        assert!(matches!(result, Err(AuthError::InvalidSession)));
    }

    #[tokio::test]
    async fn expired_token_is_rejected_and_removed() {
        let store = InMemorySessionStore::new(Duration::from_millis(0));
        let token = store.issue(&user()).await.unwrap();

        let result = store.validate(&token).await;
        assert!(matches!(result, Err(AuthError::SessionExpired)));

        // second attempt sees the token as gone entirely
        let result = store.validate(&token).await;
        assert!(matches!(result, Err(AuthError::InvalidSession)));
    }

    #[tokio::test]
    async fn revoked_token_is_rejected() {
        let store = InMemorySessionStore::new(Duration::from_secs(60));
        let token = store.issue(&user()).await.unwrap();
        store.revoke(&token).await;

        let result = store.validate(&token).await;
        assert!(matches!(result, Err(AuthError::InvalidSession)));
    }
}
