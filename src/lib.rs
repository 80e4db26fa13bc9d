//! Portdeck - Self-hosted port dashboard backend
//!
//! Tracks network ports exposed by containers and processes across one or
//! more servers, and enriches them with public-exposure metadata from a
//! companion exposure service.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
