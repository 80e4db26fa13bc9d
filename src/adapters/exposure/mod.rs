//! Exposure service adapter - reqwest client and its cache.

mod cache;
mod client;

pub use cache::TtlCache;
pub use client::ExposureClient;
