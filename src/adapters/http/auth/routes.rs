//! HTTP routes for authentication endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{change_password, get_status, login, logout, setup, AuthHandlers};

/// Creates the auth router with all endpoints.
pub fn auth_routes(handlers: AuthHandlers) -> Router {
    Router::new()
        .route("/status", get(get_status))
        .route("/setup", post(setup))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/change-password", post(change_password))
        .with_state(handlers)
}
