//! Settings HTTP adapter.

mod dto;
mod handlers;
mod routes;

pub use handlers::SettingsHandlers;
pub use routes::settings_routes;
