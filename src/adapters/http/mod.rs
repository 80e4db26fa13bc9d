//! HTTP adapters - the REST API surface.
//!
//! Each area has its own router module with handlers and DTOs;
//! [`api_router`] assembles them under `/api` with the session middleware
//! applied across the board.

pub mod auth;
pub mod error;
pub mod exposure;
pub mod middleware;
pub mod servers;
pub mod settings;

use axum::{http::StatusCode, response::IntoResponse, routing::get, Json, Router};

use auth::{auth_routes, AuthHandlers};
use exposure::{exposure_routes, ExposureHandlers};
use middleware::{session_middleware, AuthContext};
use servers::{server_routes, ServerHandlers};
use settings::{settings_routes, SettingsHandlers};

/// Assembles the full API router.
pub fn api_router(
    auth_handlers: AuthHandlers,
    exposure_handlers: ExposureHandlers,
    settings_handlers: SettingsHandlers,
    server_handlers: ServerHandlers,
    auth_ctx: AuthContext,
) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api/auth", auth_routes(auth_handlers))
        .nest("/api/exposure", exposure_routes(exposure_handlers))
        .nest(
            "/api/settings",
            settings_routes(settings_handlers, auth_ctx.clone()),
        )
        .nest("/api/servers", server_routes(server_handlers))
        .layer(axum::middleware::from_fn_with_state(
            auth_ctx,
            session_middleware,
        ))
}

/// GET /health - liveness probe for reverse proxies and agents.
async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "status": "ok",
            "version": env!("CARGO_PKG_VERSION"),
        })),
    )
}
