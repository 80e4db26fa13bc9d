//! HTTP handlers for settings endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::application::handlers::ApiKeyService;
use crate::domain::foundation::ServerId;
use crate::domain::settings::{default_settings, UserSettings};
use crate::ports::{ServerRegistry, SettingsStore};

use super::super::error::{domain_error_response, ErrorResponse};
use super::super::middleware::OptionalAuth;
use super::dto::{ApiKeyGeneratedResponse, ApiKeyInfoResponse, MessageResponse};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct SettingsHandlers {
    settings: Arc<dyn SettingsStore>,
    registry: Arc<dyn ServerRegistry>,
    api_keys: Arc<ApiKeyService>,
}

impl SettingsHandlers {
    pub fn new(
        settings: Arc<dyn SettingsStore>,
        registry: Arc<dyn ServerRegistry>,
        api_keys: Arc<ApiKeyService>,
    ) -> Self {
        Self {
            settings,
            registry,
            api_keys,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Settings CRUD
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/settings - Effective settings for the requesting user
pub async fn get_settings(
    State(handlers): State<SettingsHandlers>,
    OptionalAuth(user): OptionalAuth,
) -> Response {
    let user_id = user.map(|u| u.id);
    match handlers.settings.get_user_settings(user_id.as_ref()).await {
        Ok(settings) => (StatusCode::OK, Json(settings)).into_response(),
        Err(e) => domain_error_response(e),
    }
}

/// PUT /api/settings - Bulk upsert, echoing the updated settings
pub async fn put_settings(
    State(handlers): State<SettingsHandlers>,
    OptionalAuth(user): OptionalAuth,
    Json(settings): Json<UserSettings>,
) -> Response {
    let user_id = user.map(|u| u.id);
    if let Err(e) = handlers
        .settings
        .update_settings(user_id.as_ref(), settings)
        .await
    {
        return domain_error_response(e);
    }

    match handlers.settings.get_user_settings(user_id.as_ref()).await {
        Ok(updated) => (StatusCode::OK, Json(updated)).into_response(),
        Err(e) => domain_error_response(e),
    }
}

/// GET /api/settings/defaults - Built-in defaults
pub async fn get_defaults() -> Response {
    (StatusCode::OK, Json(default_settings())).into_response()
}

// ════════════════════════════════════════════════════════════════════════════
// Server API keys
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/settings/servers/{id}/api-key - Generate a key (local only)
pub async fn generate_api_key(
    State(handlers): State<SettingsHandlers>,
    Path(server_id): Path<String>,
) -> Response {
    let server_id = match ServerId::new(server_id) {
        Ok(id) => id,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request(e.to_string())),
            )
                .into_response()
        }
    };

    match handlers.registry.find(&server_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::not_found("Server", server_id.as_str())),
            )
                .into_response()
        }
        Err(e) => return domain_error_response(e),
    }

    if !server_id.is_local() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(
                "API keys can only be generated for the local server",
            )),
        )
            .into_response();
    }

    match handlers.api_keys.generate(&server_id).await {
        Ok(generated) => {
            let response: ApiKeyGeneratedResponse = generated.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => domain_error_response(e),
    }
}

/// GET /api/settings/servers/{id}/api-key - Key presence info
pub async fn get_api_key_info(
    State(handlers): State<SettingsHandlers>,
    Path(server_id): Path<String>,
) -> Response {
    let server_id = match ServerId::new(server_id) {
        Ok(id) => id,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request(e.to_string())),
            )
                .into_response()
        }
    };

    match handlers.api_keys.info(&server_id).await {
        Ok(Some(info)) => {
            let response: ApiKeyInfoResponse = info.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Server", server_id.as_str())),
        )
            .into_response(),
        Err(e) => domain_error_response(e),
    }
}

/// DELETE /api/settings/servers/{id}/api-key - Revoke (local only)
pub async fn revoke_api_key(
    State(handlers): State<SettingsHandlers>,
    Path(server_id): Path<String>,
) -> Response {
    let server_id = match ServerId::new(server_id) {
        Ok(id) => id,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request(e.to_string())),
            )
                .into_response()
        }
    };

    if !server_id.is_local() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(
                "Can only revoke API key for the local server",
            )),
        )
            .into_response();
    }

    match handlers.api_keys.revoke(&server_id).await {
        Ok(true) => (
            StatusCode::OK,
            Json(MessageResponse {
                success: true,
                message: "API key revoked successfully".to_string(),
            }),
        )
            .into_response(),
        Ok(false) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new(
                "NOT_FOUND",
                "Server not found or no API key to revoke",
            )),
        )
            .into_response(),
        Err(e) => domain_error_response(e),
    }
}
