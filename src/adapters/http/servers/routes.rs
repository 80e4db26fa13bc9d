//! HTTP routes for server port endpoints.

use axum::{
    routing::{get, put},
    Router,
};

use super::handlers::{get_server_ports, put_annotation, ServerHandlers};

/// Creates the servers router with all endpoints.
pub fn server_routes(handlers: ServerHandlers) -> Router {
    Router::new()
        .route("/:server_id/ports", get(get_server_ports))
        .route("/:server_id/ports/annotation", put(put_annotation))
        .with_state(handlers)
}
