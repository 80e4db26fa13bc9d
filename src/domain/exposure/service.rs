//! Exposed service record as reported by the exposure service.

use serde::{Deserialize, Serialize};

/// Where the exposure service learned about a service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ServiceSource {
    /// Discovered from a container or process on a tracked host.
    #[default]
    Internal,
    /// Manually declared in the exposure service, not container-derived.
    External,
}

/// A service the exposure service knows about.
///
/// Refreshed wholesale on each successful fetch; never partially updated.
/// Field names follow the exposure service's JSON wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExposedService {
    /// Identifier of the originating container/process on the source host.
    pub source_id: String,

    /// Service name as registered upstream.
    pub name: String,

    /// Port the service listens on.
    pub port: u16,

    /// Whether exposure is currently enabled for this service.
    pub enabled: bool,

    #[serde(default)]
    pub source: ServiceSource,

    /// Subdomain the service is actually published under, when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exposed_subdomain: Option<String>,

    /// Configured subdomain, used when no published one exists yet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subdomain: Option<String>,

    /// Certificate issuance still in progress.
    #[serde(default)]
    pub ssl_pending: bool,

    /// Last certificate error, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssl_error: Option<String>,

    /// Upstream reachability probe result (e.g. "online").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reachability_status: Option<String>,
}

impl ExposedService {
    /// The effective subdomain: the published one when present, falling
    /// back to the configured one. Empty strings count as absent.
    pub fn effective_subdomain(&self) -> Option<&str> {
        non_empty(self.exposed_subdomain.as_deref()).or_else(|| non_empty(self.subdomain.as_deref()))
    }

    /// The certificate error, treating an empty string as no error.
    pub fn ssl_error(&self) -> Option<&str> {
        non_empty(self.ssl_error.as_deref())
    }

    /// Whether the upstream probe last saw this service online.
    pub fn is_online(&self) -> bool {
        self.reachability_status.as_deref() == Some("online")
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}
