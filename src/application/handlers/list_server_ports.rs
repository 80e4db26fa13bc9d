//! ListServerPortsHandler - the enriched port listing behind the dashboard.

use std::sync::Arc;

use crate::domain::discovery::DiscoveredPort;
use crate::domain::foundation::{DomainError, ErrorCode, ServerId};
use crate::ports::{PortInventory, ServerRegistry};

use super::EnrichPortsHandler;

/// Lists a server's discovered ports with annotations applied and
/// exposure metadata attached.
pub struct ListServerPortsHandler {
    registry: Arc<dyn ServerRegistry>,
    inventory: Arc<dyn PortInventory>,
    enricher: Arc<EnrichPortsHandler>,
}

impl ListServerPortsHandler {
    pub fn new(
        registry: Arc<dyn ServerRegistry>,
        inventory: Arc<dyn PortInventory>,
        enricher: Arc<EnrichPortsHandler>,
    ) -> Self {
        Self {
            registry,
            inventory,
            enricher,
        }
    }

    pub async fn handle(
        &self,
        server_id: &ServerId,
        include_hidden: bool,
    ) -> Result<Vec<DiscoveredPort>, DomainError> {
        if self.registry.find(server_id).await?.is_none() {
            return Err(DomainError::new(
                ErrorCode::ServerNotFound,
                format!("Server not found: {}", server_id),
            ));
        }

        let mut ports = self.inventory.list_ports(server_id).await?;
        if !include_hidden {
            ports.retain(|port| !port.hidden);
        }

        Ok(self.enricher.handle(ports).await)
    }
}
