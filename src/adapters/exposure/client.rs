//! HTTP client for the exposure service.
//!
//! Implements the [`ExposureProvider`] port over reqwest. Every
//! network-facing operation normalizes HTTP-level failures (non-2xx),
//! transport failures (timeout, refused, DNS) and malformed bodies into
//! value-level results; nothing here propagates an error to a caller.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::ExposureConfig;
use crate::domain::exposure::ExposedService;
use crate::domain::settings::keys;
use crate::ports::{ConnectionOutcome, ExposureProvider, ExposureStatus, SettingsStore};

use super::cache::TtlCache;

const SERVICES_CACHE_KEY: &str = "services";
const DOMAIN_CACHE_KEY: &str = "domain";

/// Health probes use a tighter bound than data fetches so the settings UI
/// answers quickly.
const HEALTH_TIMEOUT: Duration = Duration::from_secs(5);

/// How much longer the public domain is cached than the service list.
const DOMAIN_TTL_FACTOR: u32 = 10;

#[derive(Debug, Deserialize)]
struct HealthResponse {
    status: String,
    version: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ServicesResponse {
    #[serde(default)]
    services: Vec<ExposedService>,
}

#[derive(Debug, Deserialize)]
struct DnsResponse {
    domain: Option<String>,
}

/// Client for the companion exposure service.
///
/// Constructed once at startup and shared behind an `Arc` wherever the
/// provider port is needed.
pub struct ExposureClient {
    http: reqwest::Client,
    feature_enabled: bool,
    cache_ttl: Duration,
    fetch_timeout: Duration,
    settings: Arc<dyn SettingsStore>,
    base_url: RwLock<Option<String>>,
    connected: AtomicBool,
    /// Public DNS suffix; once resolved it is never re-fetched for the
    /// lifetime of the process, even after the cache entry expires.
    sticky_domain: RwLock<Option<String>>,
    initialized: AtomicBool,
    services_cache: TtlCache<Vec<ExposedService>>,
    domain_cache: TtlCache<String>,
}

impl ExposureClient {
    /// Creates a client from configuration.
    pub fn new(config: &ExposureConfig, settings: Arc<dyn SettingsStore>) -> Self {
        Self {
            http: reqwest::Client::new(),
            feature_enabled: config.enabled,
            cache_ttl: config.cache_ttl(),
            fetch_timeout: config.request_timeout(),
            settings,
            base_url: RwLock::new(config.url.as_deref().map(normalize_url)),
            connected: AtomicBool::new(false),
            sticky_domain: RwLock::new(None),
            initialized: AtomicBool::new(false),
            services_cache: TtlCache::new(),
            domain_cache: TtlCache::new(),
        }
    }

    async fn current_base_url(&self) -> Option<String> {
        self.base_url.read().await.clone()
    }

    async fn probe_health(&self, base: &str) -> ConnectionOutcome {
        let url = format!("{}/health", base);
        let response = self
            .http
            .get(&url)
            .timeout(HEALTH_TIMEOUT)
            .header("Accept", "application/json")
            .send()
            .await;

        let response = match response {
            Ok(response) => response,
            Err(err) => {
                self.connected.store(false, Ordering::SeqCst);
                let message = if err.is_timeout() {
                    "Connection timeout".to_string()
                } else {
                    err.to_string()
                };
                tracing::warn!(%url, error = %message, "exposure service health probe failed");
                return ConnectionOutcome::failed(message);
            }
        };

        if !response.status().is_success() {
            self.connected.store(false, Ordering::SeqCst);
            return ConnectionOutcome::failed(format!("HTTP {}", response.status().as_u16()));
        }

        let health: HealthResponse = match response.json().await {
            Ok(health) => health,
            Err(err) => {
                self.connected.store(false, Ordering::SeqCst);
                tracing::warn!(%url, error = %err, "malformed health response");
                return ConnectionOutcome::failed(err.to_string());
            }
        };

        let connected = health.status == "ok";
        self.connected.store(connected, Ordering::SeqCst);
        if connected {
            tracing::info!(base, "connected to exposure service");
        }
        ConnectionOutcome {
            success: connected,
            version: Some(health.version.unwrap_or_else(|| "unknown".to_string())),
            error: None,
        }
    }
}

#[async_trait]
impl ExposureProvider for ExposureClient {
    async fn initialize(&self) {
        if self.initialized.swap(true, Ordering::SeqCst) {
            return;
        }

        match self.settings.get_user_settings(None).await {
            Ok(settings) => {
                let enabled = settings
                    .get(keys::EXPOSURE_ENABLED)
                    .and_then(Value::as_bool)
                    .unwrap_or(false);
                let url = settings
                    .get(keys::EXPOSURE_URL)
                    .and_then(Value::as_str)
                    .map(str::to_string);

                if let (true, Some(url)) = (enabled, url) {
                    tracing::info!(%url, "restoring exposure service connection");
                    self.set_base_url(Some(url)).await;
                    let result = self.test_connection().await;
                    if result.success {
                        tracing::info!("exposure service connection restored");
                    } else {
                        tracing::warn!(
                            error = result.error.as_deref().unwrap_or("unknown"),
                            "failed to restore exposure service connection"
                        );
                    }
                }
            }
            Err(err) => {
                tracing::error!(error = %err, "error initializing exposure client");
            }
        }
    }

    async fn set_base_url(&self, url: Option<String>) {
        let mut base = self.base_url.write().await;
        *base = url.as_deref().map(normalize_url);
        drop(base);

        self.connected.store(false, Ordering::SeqCst);
        self.services_cache.clear();
        self.domain_cache.clear();
    }

    async fn test_connection(&self) -> ConnectionOutcome {
        match self.current_base_url().await {
            Some(base) => self.probe_health(&base).await,
            None => ConnectionOutcome::failed("No URL configured"),
        }
    }

    async fn is_enabled(&self) -> bool {
        self.connected.load(Ordering::SeqCst) && self.base_url.read().await.is_some()
    }

    async fn get_services(&self) -> Vec<ExposedService> {
        if !self.is_enabled().await {
            return Vec::new();
        }

        if let Some(services) = self.services_cache.get(SERVICES_CACHE_KEY) {
            return services;
        }

        let base = match self.current_base_url().await {
            Some(base) => base,
            None => return Vec::new(),
        };
        let url = format!("{}/api/services?includeExternal=true", base);

        let response = match self
            .http
            .get(&url)
            .timeout(self.fetch_timeout)
            .header("Accept", "application/json")
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                tracing::error!(%url, error = %err, "error fetching exposed services");
                return Vec::new();
            }
        };

        if !response.status().is_success() {
            tracing::warn!(
                %url,
                status = response.status().as_u16(),
                "failed to fetch exposed services"
            );
            return Vec::new();
        }

        match response.json::<ServicesResponse>().await {
            Ok(body) => {
                self.services_cache
                    .set(SERVICES_CACHE_KEY, body.services.clone(), self.cache_ttl);
                body.services
            }
            Err(err) => {
                tracing::error!(%url, error = %err, "malformed services response");
                Vec::new()
            }
        }
    }

    async fn get_domain(&self) -> Option<String> {
        if !self.is_enabled().await {
            return None;
        }

        if let Some(domain) = self.sticky_domain.read().await.clone() {
            return Some(domain);
        }

        if let Some(domain) = self.domain_cache.get(DOMAIN_CACHE_KEY) {
            return Some(domain);
        }

        let base = self.current_base_url().await?;
        let url = format!("{}/api/settings/dns", base);

        let response = match self
            .http
            .get(&url)
            .timeout(self.fetch_timeout)
            .header("Accept", "application/json")
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                tracing::error!(%url, error = %err, "error fetching public domain");
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::warn!(
                %url,
                status = response.status().as_u16(),
                "failed to fetch DNS settings"
            );
            return None;
        }

        let domain = match response.json::<DnsResponse>().await {
            Ok(body) => body.domain.filter(|d| !d.is_empty()),
            Err(err) => {
                tracing::error!(%url, error = %err, "malformed DNS response");
                return None;
            }
        };

        if let Some(domain) = &domain {
            *self.sticky_domain.write().await = Some(domain.clone());
            self.domain_cache.set(
                DOMAIN_CACHE_KEY,
                domain.clone(),
                self.cache_ttl * DOMAIN_TTL_FACTOR,
            );
        }
        domain
    }

    async fn status(&self) -> ExposureStatus {
        let url = self.current_base_url().await;
        ExposureStatus {
            enabled: self.feature_enabled,
            configured: url.is_some(),
            connected: self.connected.load(Ordering::SeqCst),
            url: url.map(|u| u.trim_end_matches('/').to_string()),
        }
    }
}

fn normalize_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}
