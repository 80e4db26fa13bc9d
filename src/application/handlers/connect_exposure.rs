//! ConnectExposureHandler - wires the exposure service up and persists it.

use std::sync::Arc;

use serde_json::json;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::settings::keys;
use crate::ports::{ConnectionOutcome, ExposureProvider, SettingsStore};

/// Connects to an exposure service at a user-supplied URL.
///
/// On a successful probe the URL and enabled flag are persisted for both
/// the requesting user and the global scope, so the connection survives
/// restarts and applies when authentication is disabled.
pub struct ConnectExposureHandler {
    provider: Arc<dyn ExposureProvider>,
    settings: Arc<dyn SettingsStore>,
}

impl ConnectExposureHandler {
    pub fn new(provider: Arc<dyn ExposureProvider>, settings: Arc<dyn SettingsStore>) -> Self {
        Self { provider, settings }
    }

    pub async fn handle(
        &self,
        url: &str,
        user_id: Option<&UserId>,
    ) -> Result<ConnectionOutcome, DomainError> {
        if url.is_empty() {
            return Err(DomainError::validation("url", "URL is required"));
        }

        let clean_url = url.trim_end_matches('/').to_string();
        self.provider.set_base_url(Some(clean_url.clone())).await;

        let outcome = self.provider.test_connection().await;

        if outcome.success {
            for scope in [user_id, None] {
                self.settings
                    .update_setting(scope, keys::EXPOSURE_URL, json!(clean_url.clone()))
                    .await?;
                self.settings
                    .update_setting(scope, keys::EXPOSURE_ENABLED, json!(true))
                    .await?;
            }
            tracing::info!(url = %clean_url, "exposure service connected");
        }

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{MockSettings, StubProvider};

    #[tokio::test]
    async fn rejects_empty_url() {
        let provider = Arc::new(StubProvider::healthy());
        let settings = Arc::new(MockSettings::new());
        let handler = ConnectExposureHandler::new(provider, settings);

        assert!(handler.handle("", None).await.is_err());
    }

    #[tokio::test]
    async fn successful_connect_persists_both_scopes() {
        let provider = Arc::new(StubProvider::healthy());
        let settings = Arc::new(MockSettings::new());
        let handler = ConnectExposureHandler::new(provider.clone(), settings.clone());

        let user = UserId::new();
        let outcome = handler
            .handle("http://exposure.local///", Some(&user))
            .await
            .unwrap();
        assert!(outcome.success);

        let stored = settings.stored().await;
        // one url + one flag per scope
        assert_eq!(stored.len(), 4);
        assert!(stored
            .iter()
            .any(|(scope, key, value)| scope.is_none()
                && key == keys::EXPOSURE_URL
                && value == &json!("http://exposure.local")));
        assert!(stored
            .iter()
            .any(|(scope, key, _)| scope == &Some(user) && key == keys::EXPOSURE_ENABLED));
    }

    #[tokio::test]
    async fn failed_connect_persists_nothing() {
        let provider = Arc::new(StubProvider::unreachable());
        let settings = Arc::new(MockSettings::new());
        let handler = ConnectExposureHandler::new(provider, settings.clone());

        let outcome = handler.handle("http://down.local", None).await.unwrap();
        assert!(!outcome.success);
        assert!(settings.stored().await.is_empty());
    }

    #[tokio::test]
    async fn base_url_is_set_before_probing() {
        let provider = Arc::new(StubProvider::healthy());
        let settings = Arc::new(MockSettings::new());
        let handler = ConnectExposureHandler::new(provider.clone(), settings);

        handler.handle("http://exposure.local/", None).await.unwrap();
        assert_eq!(
            provider.last_base_url().await.as_deref(),
            Some("http://exposure.local")
        );
    }
}
