//! Exposure Provider Port - Interface to the companion exposure service.
//!
//! The exposure service tracks which internal services are published to
//! the public internet. This port abstracts it so the enrichment pipeline
//! and the HTTP layer never couple to the wire client.
//!
//! # Failure semantics
//!
//! Enrichment is an optional enhancement layered on the primary port
//! listing, so no method on this port returns `Err`: connection problems
//! surface as a failed [`ConnectionOutcome`], an empty service list, or an
//! absent domain, and callers degrade to "no enrichment".

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::exposure::ExposedService;

/// Port for exposure service interactions.
#[async_trait]
pub trait ExposureProvider: Send + Sync {
    /// One-time startup restore of a previously persisted connection.
    ///
    /// Idempotent; subsequent calls are no-ops. Failures are logged and
    /// swallowed - a dead exposure service must never block startup.
    async fn initialize(&self);

    /// Replaces the base URL. Resets connectivity and drops all cached
    /// upstream data, which must not survive a URL change.
    async fn set_base_url(&self, url: Option<String>);

    /// Probes `{base}/health` with a short timeout.
    async fn test_connection(&self) -> ConnectionOutcome;

    /// Whether a base URL is configured and the last health probe
    /// succeeded. The single gate for all enrichment work.
    async fn is_enabled(&self) -> bool;

    /// The current exposed-service list, cached. Empty when disabled or
    /// on any fetch failure.
    async fn get_services(&self) -> Vec<ExposedService>;

    /// The public DNS suffix, cached long-lived and sticky once known.
    /// `None` when disabled or on any fetch failure.
    async fn get_domain(&self) -> Option<String>;

    /// Display/telemetry snapshot; never gates behavior.
    async fn status(&self) -> ExposureStatus;
}

/// Result of a connection test, as shown inline in the settings UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ConnectionOutcome {
    /// Successful probe against the given service version.
    pub fn ok(version: impl Into<String>) -> Self {
        Self {
            success: true,
            version: Some(version.into()),
            error: None,
        }
    }

    /// Failed probe with a user-facing reason.
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            version: None,
            error: Some(error.into()),
        }
    }
}

/// Connection state snapshot for the settings UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExposureStatus {
    /// Feature flag from configuration, independent of connectivity.
    pub enabled: bool,
    /// Whether a base URL is set.
    pub configured: bool,
    /// Result of the last health probe.
    pub connected: bool,
    /// The configured URL with trailing slashes stripped.
    pub url: Option<String>,
}
