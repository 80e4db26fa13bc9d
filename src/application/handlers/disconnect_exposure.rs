//! DisconnectExposureHandler - tears the exposure connection down.

use std::sync::Arc;

use serde_json::json;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::settings::keys;
use crate::ports::{ExposureProvider, SettingsStore};

/// Disconnects from the exposure service and clears the persisted URL for
/// both the requesting user and the global scope.
pub struct DisconnectExposureHandler {
    provider: Arc<dyn ExposureProvider>,
    settings: Arc<dyn SettingsStore>,
}

impl DisconnectExposureHandler {
    pub fn new(provider: Arc<dyn ExposureProvider>, settings: Arc<dyn SettingsStore>) -> Self {
        Self { provider, settings }
    }

    pub async fn handle(&self, user_id: Option<&UserId>) -> Result<(), DomainError> {
        self.provider.set_base_url(None).await;

        for scope in [user_id, None] {
            self.settings
                .update_setting(scope, keys::EXPOSURE_ENABLED, json!(false))
                .await?;
            self.settings
                .delete_setting(scope, keys::EXPOSURE_URL)
                .await?;
        }

        tracing::info!("exposure service disconnected");
        Ok(())
    }
}
