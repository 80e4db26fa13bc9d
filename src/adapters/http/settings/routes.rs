//! HTTP routes for settings endpoints.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use super::super::middleware::{require_auth, AuthContext};
use super::handlers::{
    generate_api_key, get_api_key_info, get_defaults, get_settings, put_settings, revoke_api_key,
    SettingsHandlers,
};

/// Creates the settings router. API key management requires an
/// authenticated user when authentication is enabled.
pub fn settings_routes(handlers: SettingsHandlers, auth: AuthContext) -> Router {
    let api_key_routes = Router::new()
        .route(
            "/servers/:server_id/api-key",
            post(generate_api_key)
                .get(get_api_key_info)
                .delete(revoke_api_key),
        )
        .route_layer(middleware::from_fn_with_state(auth, require_auth));

    Router::new()
        .route("/", get(get_settings).put(put_settings))
        .route("/defaults", get(get_defaults))
        .merge(api_key_routes)
        .with_state(handlers)
}
