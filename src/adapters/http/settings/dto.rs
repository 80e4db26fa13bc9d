//! HTTP DTOs for settings endpoints.

use serde::Serialize;

use crate::application::handlers::{ApiKeyInfo, GeneratedApiKey};

/// Response after generating an API key. The key itself appears here and
/// nowhere else.
#[derive(Debug, Clone, Serialize)]
pub struct ApiKeyGeneratedResponse {
    pub success: bool,
    #[serde(rename = "apiKey")]
    pub api_key: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    pub message: String,
}

impl From<GeneratedApiKey> for ApiKeyGeneratedResponse {
    fn from(generated: GeneratedApiKey) -> Self {
        Self {
            success: true,
            api_key: generated.api_key,
            created_at: generated.created_at.to_rfc3339(),
            message: "API key generated successfully. This key will only be shown once."
                .to_string(),
        }
    }
}

/// Key presence info for display.
#[derive(Debug, Clone, Serialize)]
pub struct ApiKeyInfoResponse {
    #[serde(rename = "hasApiKey")]
    pub has_api_key: bool,
    #[serde(rename = "createdAt")]
    pub created_at: Option<String>,
}

impl From<ApiKeyInfo> for ApiKeyInfoResponse {
    fn from(info: ApiKeyInfo) -> Self {
        Self {
            has_api_key: info.has_api_key,
            created_at: info.created_at.map(|t| t.to_rfc3339()),
        }
    }
}

/// Acknowledgement with a human-readable message.
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}
