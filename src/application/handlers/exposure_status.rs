//! GetExposureStatusHandler - connection status plus display preferences.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::settings::keys;
use crate::ports::{ExposureProvider, ExposureStatus, SettingsStore};

/// Status payload for the settings UI: provider state plus how exposure
/// metadata should be rendered.
#[derive(Debug, Clone, Serialize)]
pub struct ExposureStatusView {
    #[serde(flatten)]
    pub status: ExposureStatus,
    #[serde(rename = "displayMode")]
    pub display_mode: String,
    #[serde(rename = "urlStyle")]
    pub url_style: String,
}

/// Reads the provider status and the user's display preferences.
///
/// Runs the provider's lazy initialization first, so the first status
/// request after startup restores a previously persisted connection.
pub struct GetExposureStatusHandler {
    provider: Arc<dyn ExposureProvider>,
    settings: Arc<dyn SettingsStore>,
}

impl GetExposureStatusHandler {
    pub fn new(provider: Arc<dyn ExposureProvider>, settings: Arc<dyn SettingsStore>) -> Self {
        Self { provider, settings }
    }

    pub async fn handle(&self, user_id: Option<&UserId>) -> Result<ExposureStatusView, DomainError> {
        self.provider.initialize().await;

        let status = self.provider.status().await;
        let settings = self.settings.get_user_settings(user_id).await?;

        Ok(ExposureStatusView {
            status,
            display_mode: string_setting(&settings, keys::EXPOSURE_DISPLAY_MODE, "url"),
            url_style: string_setting(&settings, keys::EXPOSURE_URL_STYLE, "compact"),
        })
    }
}

fn string_setting(
    settings: &crate::domain::settings::UserSettings,
    key: &str,
    default: &str,
) -> String {
    settings
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or(default)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{MockSettings, StubProvider};
    use serde_json::json;

    #[tokio::test]
    async fn defaults_apply_when_no_preferences_stored() {
        let provider = Arc::new(StubProvider::healthy());
        let settings = Arc::new(MockSettings::new());
        let handler = GetExposureStatusHandler::new(provider, settings);

        let view = handler.handle(None).await.unwrap();
        assert_eq!(view.display_mode, "url");
        assert_eq!(view.url_style, "compact");
        assert!(!view.status.configured);
    }

    #[tokio::test]
    async fn stored_preferences_override_defaults() {
        let provider = Arc::new(StubProvider::healthy());
        let settings = Arc::new(MockSettings::new());
        settings
            .seed(None, keys::EXPOSURE_DISPLAY_MODE, json!("badge"))
            .await;
        settings
            .seed(None, keys::EXPOSURE_URL_STYLE, json!("full"))
            .await;
        let handler = GetExposureStatusHandler::new(provider, settings);

        let view = handler.handle(None).await.unwrap();
        assert_eq!(view.display_mode, "badge");
        assert_eq!(view.url_style, "full");
    }

    #[tokio::test]
    async fn view_serializes_flat() {
        let provider = Arc::new(StubProvider::healthy());
        provider
            .set_base_url(Some("http://exposure.local".to_string()))
            .await;
        let settings = Arc::new(MockSettings::new());
        let handler = GetExposureStatusHandler::new(provider, settings);

        let view = handler.handle(None).await.unwrap();
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["configured"], true);
        assert_eq!(json["displayMode"], "url");
        assert_eq!(json["urlStyle"], "compact");
    }
}
