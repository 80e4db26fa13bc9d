//! Discovered port records.
//!
//! Ports are discovered on each tracked server by an external collaborator
//! (container runtime / process scan) and stored in the inventory. This
//! module only defines the record shape the rest of the system consumes.

use serde::{Deserialize, Serialize};

use crate::domain::exposure::ExposureDescriptor;

/// A network port discovered on a tracked server.
///
/// Serialized field names are part of the dashboard API and match what the
/// frontend table consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscoveredPort {
    /// Name of the owning container or process.
    pub owner: String,

    /// Transport protocol, e.g. "tcp".
    #[serde(default = "default_protocol")]
    pub protocol: String,

    /// Address the port is bound to on the host.
    pub host_ip: String,

    /// Host-side port number.
    pub host_port: u16,

    /// Container id when the owner is a container.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_id: Option<String>,

    /// User note attached through the dashboard.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    /// User-assigned display name overriding the owner name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_label: Option<String>,

    /// Hidden from the default listing.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub hidden: bool,

    /// Public-exposure metadata attached by the enrichment pipeline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exposure: Option<ExposureDescriptor>,
}

fn default_protocol() -> String {
    "tcp".to_string()
}

impl DiscoveredPort {
    /// Returns a copy of this port carrying the given exposure descriptor.
    pub fn with_exposure(&self, descriptor: ExposureDescriptor) -> Self {
        Self {
            exposure: Some(descriptor),
            ..self.clone()
        }
    }
}
