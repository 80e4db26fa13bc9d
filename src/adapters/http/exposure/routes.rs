//! HTTP routes for exposure endpoints.

use axum::{
    routing::{get, post, put},
    Router,
};

use super::handlers::{
    connect, disconnect, get_domain, get_services, get_status, put_display_mode, put_url_style,
    ExposureHandlers,
};

/// Creates the exposure router with all endpoints.
pub fn exposure_routes(handlers: ExposureHandlers) -> Router {
    Router::new()
        .route("/status", get(get_status))
        .route("/connect", post(connect))
        .route("/disconnect", post(disconnect))
        .route("/display-mode", put(put_display_mode))
        .route("/url-style", put(put_url_style))
        .route("/services", get(get_services))
        .route("/domain", get(get_domain))
        .with_state(handlers)
}
