//! Shared test doubles for handler tests.

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::domain::exposure::ExposedService;
use crate::domain::foundation::{DomainError, UserId};
use crate::domain::settings::{default_settings, UserSettings};
use crate::ports::{
    ConnectionOutcome, ExposureProvider, ExposureStatus, SettingsStore,
};

/// Scripted exposure provider that records `set_base_url` calls.
pub(crate) struct StubProvider {
    healthy: bool,
    pub services: Vec<ExposedService>,
    pub domain: Option<String>,
    base_url: RwLock<Option<String>>,
    connected: RwLock<bool>,
}

impl StubProvider {
    /// A provider whose health probe always succeeds.
    pub fn healthy() -> Self {
        Self {
            healthy: true,
            services: Vec::new(),
            domain: None,
            base_url: RwLock::new(None),
            connected: RwLock::new(false),
        }
    }

    /// A provider whose health probe always times out.
    pub fn unreachable() -> Self {
        Self {
            healthy: false,
            ..Self::healthy()
        }
    }

    pub async fn last_base_url(&self) -> Option<String> {
        self.base_url.read().await.clone()
    }
}

#[async_trait]
impl ExposureProvider for StubProvider {
    async fn initialize(&self) {}

    async fn set_base_url(&self, url: Option<String>) {
        *self.base_url.write().await = url;
        *self.connected.write().await = false;
    }

    async fn test_connection(&self) -> ConnectionOutcome {
        if self.base_url.read().await.is_none() {
            return ConnectionOutcome::failed("No URL configured");
        }
        if self.healthy {
            *self.connected.write().await = true;
            ConnectionOutcome::ok("1.0.0")
        } else {
            ConnectionOutcome::failed("Connection timeout")
        }
    }

    async fn is_enabled(&self) -> bool {
        *self.connected.read().await && self.base_url.read().await.is_some()
    }

    async fn get_services(&self) -> Vec<ExposedService> {
        if self.is_enabled().await {
            self.services.clone()
        } else {
            Vec::new()
        }
    }

    async fn get_domain(&self) -> Option<String> {
        if self.is_enabled().await {
            self.domain.clone()
        } else {
            None
        }
    }

    async fn status(&self) -> ExposureStatus {
        let url = self.base_url.read().await.clone();
        ExposureStatus {
            enabled: true,
            configured: url.is_some(),
            connected: *self.connected.read().await,
            url,
        }
    }
}

type StoredSetting = (Option<UserId>, String, Value);

/// In-memory settings store that records every write and delete.
pub(crate) struct MockSettings {
    writes: RwLock<Vec<StoredSetting>>,
    deletes: RwLock<Vec<(Option<UserId>, String)>>,
}

impl MockSettings {
    pub fn new() -> Self {
        Self {
            writes: RwLock::new(Vec::new()),
            deletes: RwLock::new(Vec::new()),
        }
    }

    pub async fn stored(&self) -> Vec<StoredSetting> {
        self.writes.read().await.clone()
    }

    pub async fn deleted(&self) -> Vec<(Option<UserId>, String)> {
        self.deletes.read().await.clone()
    }

    pub async fn seed(&self, scope: Option<UserId>, key: &str, value: Value) {
        self.writes.write().await.push((scope, key.to_string(), value));
    }
}

#[async_trait]
impl SettingsStore for MockSettings {
    async fn get_user_settings(
        &self,
        user_id: Option<&UserId>,
    ) -> Result<UserSettings, DomainError> {
        let mut settings = default_settings();
        for (scope, key, value) in self.writes.read().await.iter() {
            if scope.as_ref() == user_id {
                settings.insert(key.clone(), value.clone());
            }
        }
        Ok(settings)
    }

    async fn update_setting(
        &self,
        user_id: Option<&UserId>,
        key: &str,
        value: Value,
    ) -> Result<(), DomainError> {
        self.writes
            .write()
            .await
            .push((user_id.copied(), key.to_string(), value));
        Ok(())
    }

    async fn update_settings(
        &self,
        user_id: Option<&UserId>,
        settings: UserSettings,
    ) -> Result<(), DomainError> {
        for (key, value) in settings {
            self.update_setting(user_id, &key, value).await?;
        }
        Ok(())
    }

    async fn delete_setting(
        &self,
        user_id: Option<&UserId>,
        key: &str,
    ) -> Result<bool, DomainError> {
        self.deletes
            .write()
            .await
            .push((user_id.copied(), key.to_string()));
        Ok(true)
    }
}
