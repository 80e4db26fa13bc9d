//! Port Inventory Port - Discovered ports and user annotations.
//!
//! How rows arrive in the inventory is the discovery collaborator's
//! business (container runtime scan, remote agent report); this port only
//! covers reading the inventory and maintaining user annotations.

use async_trait::async_trait;

use crate::domain::discovery::DiscoveredPort;
use crate::domain::foundation::{DomainError, ServerId};

/// A user annotation addressed by `(host_ip, host_port)` within a server.
#[derive(Debug, Clone, PartialEq)]
pub struct PortAnnotation {
    pub host_ip: String,
    pub host_port: u16,
    pub note: Option<String>,
    pub custom_label: Option<String>,
    pub hidden: bool,
}

/// Port for the discovered-port inventory.
#[async_trait]
pub trait PortInventory: Send + Sync {
    /// All known ports for a server with annotations already applied,
    /// hidden rows included.
    async fn list_ports(&self, server_id: &ServerId) -> Result<Vec<DiscoveredPort>, DomainError>;

    /// Creates or replaces the annotation for one port.
    async fn upsert_annotation(
        &self,
        server_id: &ServerId,
        annotation: &PortAnnotation,
    ) -> Result<(), DomainError>;
}
