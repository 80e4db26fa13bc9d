//! Exposure domain - records and decision logic for public-exposure metadata.
//!
//! The exposure service is a companion system that publishes selected
//! internal services to the public internet. This module holds its record
//! types and the pure logic that associates discovered ports with exposed
//! services: the tiered matcher and the descriptor builder.

mod descriptor;
mod matcher;
mod service;

pub use descriptor::{build_exposure_data, ExposureDescriptor, SslStatus};
pub use matcher::{clean_owner_name, find_service_for_port};
pub use service::{ExposedService, ServiceSource};
