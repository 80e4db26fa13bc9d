//! Display-ready exposure descriptor built from a matched service.

use serde::{Deserialize, Serialize};

use super::service::ExposedService;

/// Certificate state for an exposed service, as shown on the port badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SslStatus {
    Active,
    Pending,
    Error,
    None,
}

impl SslStatus {
    /// Ordered derivation rule: pending wins over error, error wins over
    /// active. A service can carry both a subdomain and an error flag;
    /// error must win so a broken certificate never shows a secure badge.
    pub fn derive(ssl_pending: bool, has_ssl_error: bool, has_subdomain: bool) -> Self {
        if ssl_pending {
            SslStatus::Pending
        } else if has_ssl_error {
            SslStatus::Error
        } else if has_subdomain {
            SslStatus::Active
        } else {
            SslStatus::None
        }
    }
}

/// Public-exposure metadata attached to a discovered port for display.
///
/// Created fresh per enrichment call; not persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExposureDescriptor {
    pub subdomain: String,
    pub domain: String,
    pub public_url: String,
    pub hostname: String,
    pub ssl_status: SslStatus,
    pub ssl_error: Option<String>,
    pub online: bool,
}

/// Builds the display descriptor for a matched service under the given
/// public domain.
///
/// Returns `None` when the domain is empty or the service has no usable
/// subdomain: a badge without a hostname is useless to the user, so a
/// subdomain-less match suppresses enrichment entirely.
pub fn build_exposure_data(service: &ExposedService, domain: &str) -> Option<ExposureDescriptor> {
    if domain.is_empty() {
        return None;
    }
    let subdomain = service.effective_subdomain()?;

    let hostname = format!("{}.{}", subdomain, domain);
    let ssl_status = SslStatus::derive(
        service.ssl_pending,
        service.ssl_error().is_some(),
        true,
    );

    Some(ExposureDescriptor {
        subdomain: subdomain.to_string(),
        domain: domain.to_string(),
        public_url: format!("https://{}", hostname),
        hostname,
        ssl_status,
        ssl_error: service.ssl_error().map(str::to_string),
        online: service.is_online(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::exposure::ServiceSource;

    fn service(subdomain: Option<&str>) -> ExposedService {
        ExposedService {
            source_id: "c1".to_string(),
            name: "plex".to_string(),
            port: 32400,
            enabled: true,
            source: ServiceSource::Internal,
            exposed_subdomain: None,
            subdomain: subdomain.map(str::to_string),
            ssl_pending: false,
            ssl_error: None,
            reachability_status: None,
        }
    }

    #[test]
    fn builds_url_and_hostname() {
        let svc = service(Some("media"));
        let data = build_exposure_data(&svc, "example.com").unwrap();
        assert_eq!(data.public_url, "https://media.example.com");
        assert_eq!(data.hostname, "media.example.com");
        assert_eq!(data.subdomain, "media");
        assert_eq!(data.domain, "example.com");
        assert_eq!(data.ssl_status, SslStatus::Active);
        assert!(!data.online);
    }

    #[test]
    fn pending_wins_over_error() {
        let mut svc = service(Some("media"));
        svc.ssl_pending = true;
        svc.ssl_error = Some("handshake failed".to_string());
        let data = build_exposure_data(&svc, "example.com").unwrap();
        assert_eq!(data.ssl_status, SslStatus::Pending);
    }

    #[test]
    fn error_wins_over_active() {
        let mut svc = service(Some("media"));
        svc.ssl_error = Some("expired".to_string());
        let data = build_exposure_data(&svc, "example.com").unwrap();
        assert_eq!(data.ssl_status, SslStatus::Error);
        assert_eq!(data.ssl_error.as_deref(), Some("expired"));
    }

    #[test]
    fn missing_subdomain_suppresses_descriptor() {
        let svc = service(None);
        assert!(build_exposure_data(&svc, "example.com").is_none());
    }

    #[test]
    fn empty_domain_suppresses_descriptor() {
        let svc = service(Some("media"));
        assert!(build_exposure_data(&svc, "").is_none());
    }

    #[test]
    fn online_carried_from_reachability() {
        let mut svc = service(Some("media"));
        svc.reachability_status = Some("online".to_string());
        let data = build_exposure_data(&svc, "example.com").unwrap();
        assert!(data.online);
    }

    #[test]
    fn derive_rule_table() {
        // (pending, error, subdomain) in priority order
        assert_eq!(SslStatus::derive(true, true, true), SslStatus::Pending);
        assert_eq!(SslStatus::derive(false, true, true), SslStatus::Error);
        assert_eq!(SslStatus::derive(false, false, true), SslStatus::Active);
        assert_eq!(SslStatus::derive(false, false, false), SslStatus::None);
        assert_eq!(SslStatus::derive(true, false, false), SslStatus::Pending);
        assert_eq!(SslStatus::derive(false, true, false), SslStatus::Error);
    }

    #[test]
    fn serializes_camel_case() {
        let svc = service(Some("media"));
        let data = build_exposure_data(&svc, "example.com").unwrap();
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["publicUrl"], "https://media.example.com");
        assert_eq!(json["sslStatus"], "active");
    }
}
