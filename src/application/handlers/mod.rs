//! Handlers - one per operation, constructed with their port dependencies.

#[cfg(test)]
pub(crate) mod test_support;

mod api_keys;
mod connect_exposure;
mod disconnect_exposure;
mod enrich_ports;
mod exposure_status;
mod list_server_ports;

pub use api_keys::{ApiKeyInfo, ApiKeyService, GeneratedApiKey};
pub use connect_exposure::ConnectExposureHandler;
pub use disconnect_exposure::DisconnectExposureHandler;
pub use enrich_ports::EnrichPortsHandler;
pub use exposure_status::{ExposureStatusView, GetExposureStatusHandler};
pub use list_server_ports::ListServerPortsHandler;
