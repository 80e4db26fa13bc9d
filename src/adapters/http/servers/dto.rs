//! HTTP DTOs for server port endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::discovery::DiscoveredPort;
use crate::ports::PortAnnotation;

/// Query parameters for the port listing.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ListPortsQuery {
    #[serde(default)]
    pub include_hidden: bool,
}

/// Port listing response.
#[derive(Debug, Clone, Serialize)]
pub struct PortsResponse {
    pub ports: Vec<DiscoveredPort>,
}

/// Annotation upsert request.
#[derive(Debug, Clone, Deserialize)]
pub struct AnnotationRequest {
    pub host_ip: String,
    pub host_port: u16,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub custom_label: Option<String>,
    #[serde(default)]
    pub hidden: bool,
}

impl From<AnnotationRequest> for PortAnnotation {
    fn from(req: AnnotationRequest) -> Self {
        Self {
            host_ip: req.host_ip,
            host_port: req.host_port,
            note: req.note,
            custom_label: req.custom_label,
            hidden: req.hidden,
        }
    }
}

/// Generic success acknowledgement.
#[derive(Debug, Clone, Serialize)]
pub struct AckResponse {
    pub success: bool,
}
