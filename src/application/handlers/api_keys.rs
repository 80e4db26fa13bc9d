//! ApiKeyService - generation and validation of server API keys.
//!
//! Remote agents authenticate their reports with a per-server API key.
//! Keys are 32 random bytes hex-encoded; only the bcrypt hash is stored
//! and the plaintext is returned exactly once at generation time.

use std::sync::Arc;

use rand::RngCore;

use crate::adapters::auth::PasswordService;
use crate::domain::foundation::{DomainError, ErrorCode, ServerId, Timestamp};
use crate::ports::ServerRegistry;

const API_KEY_BYTES: usize = 32;

/// A freshly generated key, shown to the user once.
#[derive(Debug, Clone)]
pub struct GeneratedApiKey {
    pub api_key: String,
    pub created_at: Timestamp,
}

/// Key presence info, safe to display.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiKeyInfo {
    pub has_api_key: bool,
    pub created_at: Option<Timestamp>,
}

/// Manages server API keys through the registry.
pub struct ApiKeyService {
    registry: Arc<dyn ServerRegistry>,
    passwords: PasswordService,
}

impl ApiKeyService {
    pub fn new(registry: Arc<dyn ServerRegistry>, passwords: PasswordService) -> Self {
        Self {
            registry,
            passwords,
        }
    }

    /// Generates and stores a new API key for an existing server,
    /// replacing any previous key.
    pub async fn generate(&self, server_id: &ServerId) -> Result<GeneratedApiKey, DomainError> {
        if self.registry.find(server_id).await?.is_none() {
            return Err(DomainError::new(
                ErrorCode::ServerNotFound,
                format!("Server not found: {}", server_id),
            ));
        }

        let mut bytes = [0u8; API_KEY_BYTES];
        rand::thread_rng().fill_bytes(&mut bytes);
        let api_key = hex::encode(bytes);

        let hash = self
            .passwords
            .hash(&api_key)
            .map_err(|e| DomainError::new(ErrorCode::InternalError, e.to_string()))?;
        let created_at = Timestamp::now();

        self.registry
            .set_api_key(server_id, &hash, created_at)
            .await?;

        tracing::info!(server = %server_id, "API key generated");
        Ok(GeneratedApiKey {
            api_key,
            created_at,
        })
    }

    /// Checks a presented key against one server's stored hash.
    pub async fn validate(&self, server_id: &ServerId, key: &str) -> Result<bool, DomainError> {
        if key.is_empty() {
            return Ok(false);
        }
        let server = self.registry.find(server_id).await?;
        Ok(server
            .and_then(|s| s.api_key_hash)
            .map(|hash| self.passwords.verify(key, &hash))
            .unwrap_or(false))
    }

    /// Checks a presented key against every server that has one, returning
    /// the matching server.
    pub async fn validate_any(&self, key: &str) -> Result<Option<ServerId>, DomainError> {
        if key.is_empty() {
            return Ok(None);
        }
        for server in self.registry.list_with_api_keys().await? {
            if let Some(hash) = &server.api_key_hash {
                if self.passwords.verify(key, hash) {
                    return Ok(Some(server.id));
                }
            }
        }
        Ok(None)
    }

    /// Key presence and creation time for display.
    pub async fn info(&self, server_id: &ServerId) -> Result<Option<ApiKeyInfo>, DomainError> {
        let server = self.registry.find(server_id).await?;
        Ok(server.map(|s| ApiKeyInfo {
            has_api_key: s.api_key_hash.is_some(),
            created_at: s.api_key_created_at,
        }))
    }

    /// Revokes a server's key. Returns false when there was none.
    pub async fn revoke(&self, server_id: &ServerId) -> Result<bool, DomainError> {
        let revoked = self.registry.clear_api_key(server_id).await?;
        if revoked {
            tracing::info!(server = %server_id, "API key revoked");
        }
        Ok(revoked)
    }
}
