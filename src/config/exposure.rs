//! Exposure service configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Configuration for the companion exposure service integration.
///
/// The service tracks which internal services are published to the public
/// internet. Integration is an optional enhancement: when disabled or
/// unreachable, port listings are served without exposure metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct ExposureConfig {
    /// Feature flag for the integration
    #[serde(default)]
    pub enabled: bool,

    /// Base URL of the exposure service, if pre-configured
    pub url: Option<String>,

    /// TTL for the cached service list in milliseconds
    #[serde(default = "default_cache_ttl_ms")]
    pub cache_ttl_ms: u64,

    /// Timeout for service-list and domain fetches in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl ExposureConfig {
    /// Get the service-list cache TTL as Duration
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_millis(self.cache_ttl_ms)
    }

    /// Get the fetch timeout as Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validate exposure configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(url) = &self.url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ValidationError::InvalidExposureUrl);
            }
        }
        if self.cache_ttl_ms == 0 {
            return Err(ValidationError::InvalidCacheTtl);
        }
        if self.request_timeout_secs == 0 || self.request_timeout_secs > 60 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for ExposureConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            url: None,
            cache_ttl_ms: default_cache_ttl_ms(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

fn default_cache_ttl_ms() -> u64 {
    30_000
}

fn default_request_timeout() -> u64 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exposure_config_defaults() {
        let config = ExposureConfig::default();
        assert!(!config.enabled);
        assert!(config.url.is_none());
        assert_eq!(config.cache_ttl_ms, 30_000);
        assert_eq!(config.request_timeout_secs, 10);
    }

    #[test]
    fn test_cache_ttl_duration() {
        let config = ExposureConfig {
            cache_ttl_ms: 5_000,
            ..Default::default()
        };
        assert_eq!(config.cache_ttl(), Duration::from_millis(5_000));
    }

    #[test]
    fn test_validation_rejects_non_http_url() {
        let config = ExposureConfig {
            url: Some("ftp://exposure.local".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_ttl() {
        let config = ExposureConfig {
            cache_ttl_ms: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_accepts_https_url() {
        let config = ExposureConfig {
            url: Some("https://exposure.example.com".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
