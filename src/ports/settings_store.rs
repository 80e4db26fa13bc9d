//! Settings Store Port - Per-user key/value settings persistence.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::settings::UserSettings;

/// Port for reading and writing user settings.
///
/// A `None` user id addresses the global (anonymous) scope, which doubles
/// as the fallback when authentication is disabled.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Effective settings for a user: defaults overlaid with stored
    /// overrides.
    async fn get_user_settings(&self, user_id: Option<&UserId>)
        -> Result<UserSettings, DomainError>;

    /// Upserts a single setting.
    async fn update_setting(
        &self,
        user_id: Option<&UserId>,
        key: &str,
        value: Value,
    ) -> Result<(), DomainError>;

    /// Upserts a batch of settings.
    async fn update_settings(
        &self,
        user_id: Option<&UserId>,
        settings: UserSettings,
    ) -> Result<(), DomainError>;

    /// Deletes a setting override. Returns whether a row was removed.
    async fn delete_setting(&self, user_id: Option<&UserId>, key: &str)
        -> Result<bool, DomainError>;
}
