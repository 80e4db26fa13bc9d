//! Exposure HTTP adapter.

mod dto;
mod handlers;
mod routes;

pub use handlers::ExposureHandlers;
pub use routes::exposure_routes;
