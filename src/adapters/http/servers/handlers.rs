//! HTTP handlers for server port endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::application::handlers::ListServerPortsHandler;
use crate::domain::foundation::ServerId;
use crate::ports::PortInventory;

use super::super::error::{domain_error_response, ErrorResponse};
use super::dto::{AckResponse, AnnotationRequest, ListPortsQuery, PortsResponse};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct ServerHandlers {
    list_ports: Arc<ListServerPortsHandler>,
    inventory: Arc<dyn PortInventory>,
}

impl ServerHandlers {
    pub fn new(list_ports: Arc<ListServerPortsHandler>, inventory: Arc<dyn PortInventory>) -> Self {
        Self {
            list_ports,
            inventory,
        }
    }
}

fn parse_server_id(raw: String) -> Result<ServerId, Response> {
    ServerId::new(raw).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(e.to_string())),
        )
            .into_response()
    })
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/servers/{id}/ports - Annotated, enriched port listing
pub async fn get_server_ports(
    State(handlers): State<ServerHandlers>,
    Path(server_id): Path<String>,
    Query(query): Query<ListPortsQuery>,
) -> Response {
    let server_id = match parse_server_id(server_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .list_ports
        .handle(&server_id, query.include_hidden)
        .await
    {
        Ok(ports) => (StatusCode::OK, Json(PortsResponse { ports })).into_response(),
        Err(e) => domain_error_response(e),
    }
}

/// PUT /api/servers/{id}/ports/annotation - Upsert one port annotation
pub async fn put_annotation(
    State(handlers): State<ServerHandlers>,
    Path(server_id): Path<String>,
    Json(req): Json<AnnotationRequest>,
) -> Response {
    let server_id = match parse_server_id(server_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .inventory
        .upsert_annotation(&server_id, &req.into())
        .await
    {
        Ok(()) => (StatusCode::OK, Json(AckResponse { success: true })).into_response(),
        Err(e) => domain_error_response(e),
    }
}
