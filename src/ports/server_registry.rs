//! Server Registry Port - Tracked servers and their API keys.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ServerId, Timestamp};

/// A tracked server row.
///
/// Only the bcrypt hash of an API key is ever stored; the plaintext key is
/// shown to the user exactly once at generation time.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerRecord {
    pub id: ServerId,
    pub label: String,
    pub api_key_hash: Option<String>,
    pub api_key_created_at: Option<Timestamp>,
}

/// Port for the server registry.
#[async_trait]
pub trait ServerRegistry: Send + Sync {
    async fn find(&self, id: &ServerId) -> Result<Option<ServerRecord>, DomainError>;

    /// Stores a freshly generated API key hash for a server.
    async fn set_api_key(
        &self,
        id: &ServerId,
        hash: &str,
        created_at: Timestamp,
    ) -> Result<(), DomainError>;

    /// Clears a server's API key. Returns whether a key was present.
    async fn clear_api_key(&self, id: &ServerId) -> Result<bool, DomainError>;

    /// All servers that currently have an API key set.
    async fn list_with_api_keys(&self) -> Result<Vec<ServerRecord>, DomainError>;
}
