//! Authentication configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Authentication configuration
///
/// Authentication is optional for single-user deployments behind a
/// trusted reverse proxy; when disabled every request is treated as
/// an anonymous authenticated user.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Whether session authentication is enabled
    #[serde(default)]
    pub enabled: bool,

    /// Session lifetime in seconds
    #[serde(default = "default_session_ttl")]
    pub session_ttl_secs: u64,

    /// bcrypt work factor for password and API key hashing
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

impl AuthConfig {
    /// Get session lifetime as Duration
    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }

    /// Validate authentication configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.session_ttl_secs == 0 {
            return Err(ValidationError::InvalidSessionTtl);
        }
        if !(4..=15).contains(&self.bcrypt_cost) {
            return Err(ValidationError::InvalidBcryptCost);
        }
        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            session_ttl_secs: default_session_ttl(),
            bcrypt_cost: default_bcrypt_cost(),
        }
    }
}

fn default_session_ttl() -> u64 {
    86400
}

fn default_bcrypt_cost() -> u32 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_config_defaults() {
        let config = AuthConfig::default();
        assert!(!config.enabled);
        assert_eq!(config.session_ttl_secs, 86400);
        assert_eq!(config.bcrypt_cost, 10);
    }

    #[test]
    fn test_validation_zero_session_ttl() {
        let config = AuthConfig {
            session_ttl_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_bcrypt_cost_bounds() {
        let config = AuthConfig {
            bcrypt_cost: 3,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = AuthConfig {
            bcrypt_cost: 16,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = AuthConfig {
            bcrypt_cost: 12,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
