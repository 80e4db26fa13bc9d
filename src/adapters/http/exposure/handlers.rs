//! HTTP handlers for exposure endpoints.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::application::handlers::{
    ConnectExposureHandler, DisconnectExposureHandler, GetExposureStatusHandler,
};
use crate::domain::settings::keys;
use crate::ports::{ExposureProvider, SettingsStore};

use super::super::error::{domain_error_response, ErrorResponse};
use super::super::middleware::OptionalAuth;
use super::dto::{
    AckResponse, ConnectRequest, DisplayModeRequest, DisplayModeResponse, DomainResponse,
    ServicesResponse, UrlStyleRequest, UrlStyleResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct ExposureHandlers {
    status: Arc<GetExposureStatusHandler>,
    connect: Arc<ConnectExposureHandler>,
    disconnect: Arc<DisconnectExposureHandler>,
    provider: Arc<dyn ExposureProvider>,
    settings: Arc<dyn SettingsStore>,
}

impl ExposureHandlers {
    pub fn new(
        status: Arc<GetExposureStatusHandler>,
        connect: Arc<ConnectExposureHandler>,
        disconnect: Arc<DisconnectExposureHandler>,
        provider: Arc<dyn ExposureProvider>,
        settings: Arc<dyn SettingsStore>,
    ) -> Self {
        Self {
            status,
            connect,
            disconnect,
            provider,
            settings,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/exposure/status - Provider status and display preferences
pub async fn get_status(
    State(handlers): State<ExposureHandlers>,
    OptionalAuth(user): OptionalAuth,
) -> Response {
    let user_id = user.map(|u| u.id);
    match handlers.status.handle(user_id.as_ref()).await {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(e) => domain_error_response(e),
    }
}

/// POST /api/exposure/connect - Connect to an exposure service
pub async fn connect(
    State(handlers): State<ExposureHandlers>,
    OptionalAuth(user): OptionalAuth,
    Json(req): Json<ConnectRequest>,
) -> Response {
    let user_id = user.map(|u| u.id);
    match handlers.connect.handle(&req.url, user_id.as_ref()).await {
        Ok(outcome) => (StatusCode::OK, Json(outcome)).into_response(),
        Err(e) => domain_error_response(e),
    }
}

/// POST /api/exposure/disconnect - Drop the exposure connection
pub async fn disconnect(
    State(handlers): State<ExposureHandlers>,
    OptionalAuth(user): OptionalAuth,
) -> Response {
    let user_id = user.map(|u| u.id);
    match handlers.disconnect.handle(user_id.as_ref()).await {
        Ok(()) => (StatusCode::OK, Json(AckResponse { success: true })).into_response(),
        Err(e) => domain_error_response(e),
    }
}

/// PUT /api/exposure/display-mode - Persist the rendering mode
pub async fn put_display_mode(
    State(handlers): State<ExposureHandlers>,
    OptionalAuth(user): OptionalAuth,
    Json(req): Json<DisplayModeRequest>,
) -> Response {
    if !["url", "badge"].contains(&req.mode.as_str()) {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(
                "Invalid display mode. Use \"url\" or \"badge\".",
            )),
        )
            .into_response();
    }

    let user_id = user.map(|u| u.id);
    for scope in [user_id.as_ref(), None] {
        if let Err(e) = handlers
            .settings
            .update_setting(scope, keys::EXPOSURE_DISPLAY_MODE, json!(req.mode.clone()))
            .await
        {
            return domain_error_response(e);
        }
    }

    (
        StatusCode::OK,
        Json(DisplayModeResponse {
            success: true,
            display_mode: req.mode,
        }),
    )
        .into_response()
}

/// PUT /api/exposure/url-style - Persist the URL rendering style
pub async fn put_url_style(
    State(handlers): State<ExposureHandlers>,
    OptionalAuth(user): OptionalAuth,
    Json(req): Json<UrlStyleRequest>,
) -> Response {
    if !["full", "compact"].contains(&req.style.as_str()) {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(
                "Invalid URL style. Use \"full\" or \"compact\".",
            )),
        )
            .into_response();
    }

    let user_id = user.map(|u| u.id);
    for scope in [user_id.as_ref(), None] {
        if let Err(e) = handlers
            .settings
            .update_setting(scope, keys::EXPOSURE_URL_STYLE, json!(req.style.clone()))
            .await
        {
            return domain_error_response(e);
        }
    }

    (
        StatusCode::OK,
        Json(UrlStyleResponse {
            success: true,
            url_style: req.style,
        }),
    )
        .into_response()
}

/// GET /api/exposure/services - Current exposed-service list
pub async fn get_services(State(handlers): State<ExposureHandlers>) -> Response {
    let services = handlers.provider.get_services().await;
    (StatusCode::OK, Json(ServicesResponse { services })).into_response()
}

/// GET /api/exposure/domain - Public DNS suffix
pub async fn get_domain(State(handlers): State<ExposureHandlers>) -> Response {
    let domain = handlers.provider.get_domain().await;
    (StatusCode::OK, Json(DomainResponse { domain })).into_response()
}
