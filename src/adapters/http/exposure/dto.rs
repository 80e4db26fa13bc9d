//! HTTP DTOs for exposure endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::exposure::ExposedService;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to connect to an exposure service.
#[derive(Debug, Clone, Deserialize)]
pub struct ConnectRequest {
    pub url: String,
}

/// Request to change how exposure metadata is rendered.
#[derive(Debug, Clone, Deserialize)]
pub struct DisplayModeRequest {
    pub mode: String,
}

/// Request to change URL rendering style.
#[derive(Debug, Clone, Deserialize)]
pub struct UrlStyleRequest {
    pub style: String,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Generic success acknowledgement.
#[derive(Debug, Clone, Serialize)]
pub struct AckResponse {
    pub success: bool,
}

/// Acknowledgement carrying the stored display mode.
#[derive(Debug, Clone, Serialize)]
pub struct DisplayModeResponse {
    pub success: bool,
    #[serde(rename = "displayMode")]
    pub display_mode: String,
}

/// Acknowledgement carrying the stored URL style.
#[derive(Debug, Clone, Serialize)]
pub struct UrlStyleResponse {
    pub success: bool,
    #[serde(rename = "urlStyle")]
    pub url_style: String,
}

/// Service list pass-through.
#[derive(Debug, Clone, Serialize)]
pub struct ServicesResponse {
    pub services: Vec<ExposedService>,
}

/// Domain pass-through.
#[derive(Debug, Clone, Serialize)]
pub struct DomainResponse {
    pub domain: Option<String>,
}
