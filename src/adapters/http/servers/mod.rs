//! Server ports HTTP adapter.

mod dto;
mod handlers;
mod routes;

pub use handlers::ServerHandlers;
pub use routes::server_routes;
