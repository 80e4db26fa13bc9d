//! HTTP DTOs for authentication endpoints.

use serde::{Deserialize, Serialize};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// First-run setup request.
#[derive(Debug, Clone, Deserialize)]
pub struct SetupRequest {
    pub username: String,
    pub password: String,
}

/// Login request.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Password change request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Authentication state for the frontend router.
#[derive(Debug, Clone, Serialize)]
pub struct AuthStatusResponse {
    #[serde(rename = "authEnabled")]
    pub auth_enabled: bool,
    pub authenticated: bool,
    #[serde(rename = "setupRequired")]
    pub setup_required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

/// Successful setup or login: the session token goes in subsequent
/// `Authorization: Bearer` headers.
#[derive(Debug, Clone, Serialize)]
pub struct SessionResponse {
    pub success: bool,
    pub username: String,
    pub token: String,
}

/// Acknowledgement with a human-readable message.
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}
