//! EnrichPortsHandler - attaches public-exposure metadata to port listings.

use std::sync::Arc;

use crate::domain::discovery::DiscoveredPort;
use crate::domain::exposure::{build_exposure_data, find_service_for_port};
use crate::ports::ExposureProvider;

/// Enrichment pipeline over a batch of discovered ports.
///
/// When the exposure provider is disabled, or the service list or public
/// domain cannot be obtained, the input passes through unchanged -
/// enrichment is an enhancement, never a gate on the primary listing.
pub struct EnrichPortsHandler {
    provider: Arc<dyn ExposureProvider>,
}

impl EnrichPortsHandler {
    pub fn new(provider: Arc<dyn ExposureProvider>) -> Self {
        Self { provider }
    }

    pub async fn handle(&self, ports: Vec<DiscoveredPort>) -> Vec<DiscoveredPort> {
        if !self.provider.is_enabled().await {
            tracing::debug!("exposure provider not enabled, skipping enrichment");
            return ports;
        }

        // Independent endpoints, fetched concurrently.
        let (services, domain) = tokio::join!(
            self.provider.get_services(),
            self.provider.get_domain()
        );

        tracing::debug!(
            services = services.len(),
            domain = domain.as_deref().unwrap_or(""),
            ports = ports.len(),
            "enriching port listing"
        );

        let domain = match domain {
            Some(domain) if !services.is_empty() => domain,
            _ => return ports,
        };

        let mut match_count = 0;
        let enriched: Vec<DiscoveredPort> = ports
            .into_iter()
            .map(|port| {
                let descriptor = find_service_for_port(&port.owner, port.host_port, &services)
                    .and_then(|svc| build_exposure_data(svc, &domain));
                match descriptor {
                    Some(descriptor) => {
                        match_count += 1;
                        port.with_exposure(descriptor)
                    }
                    None => port,
                }
            })
            .collect();

        tracing::debug!(match_count, "matched ports against exposed services");
        enriched
    }
}
