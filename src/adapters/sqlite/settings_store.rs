//! SQLite implementation of SettingsStore.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::{Row, SqlitePool};

use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::domain::settings::{default_settings, UserSettings};
use crate::ports::SettingsStore;

/// SQLite-backed settings store.
///
/// Values are stored as text: strings raw, everything else JSON-encoded.
/// Reads parse leniently - a value that is not valid JSON is returned as a
/// plain string rather than failing the whole settings fetch.
#[derive(Clone)]
pub struct SqliteSettingsStore {
    pool: SqlitePool,
}

impl SqliteSettingsStore {
    /// Creates a new SqliteSettingsStore.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn serialize_value(value: &Value) -> String {
        match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }

    fn parse_value(raw: &str) -> Value {
        serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
    }
}

#[async_trait]
impl SettingsStore for SqliteSettingsStore {
    async fn get_user_settings(
        &self,
        user_id: Option<&UserId>,
    ) -> Result<UserSettings, DomainError> {
        let rows = sqlx::query(
            "SELECT setting_key, setting_value FROM user_settings WHERE user_id IS ?",
        )
        .bind(user_id.map(UserId::to_string))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to fetch settings: {}", e)))?;

        let mut settings = default_settings();
        for row in rows {
            let key: String = row.get("setting_key");
            let value: Option<String> = row.get("setting_value");
            settings.insert(key, Self::parse_value(value.as_deref().unwrap_or("")));
        }
        Ok(settings)
    }

    async fn update_setting(
        &self,
        user_id: Option<&UserId>,
        key: &str,
        value: Value,
    ) -> Result<(), DomainError> {
        if key.is_empty() {
            return Err(DomainError::validation("setting_key", "cannot be empty"));
        }

        let serialized = Self::serialize_value(&value);
        let now = Timestamp::now().as_unix_millis();
        let user_id = user_id.map(UserId::to_string);

        // UNIQUE(user_id, setting_key) does not fire for NULL user ids in
        // SQLite, so the upsert has to be a manual check with `IS`.
        let existing = sqlx::query(
            "SELECT id FROM user_settings WHERE user_id IS ? AND setting_key = ?",
        )
        .bind(&user_id)
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to look up setting: {}", e)))?;

        if existing.is_some() {
            sqlx::query(
                "UPDATE user_settings SET setting_value = ?, updated_at = ? \
                 WHERE user_id IS ? AND setting_key = ?",
            )
            .bind(&serialized)
            .bind(now)
            .bind(&user_id)
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to update setting: {}", e)))?;
        } else {
            sqlx::query(
                "INSERT INTO user_settings (user_id, setting_key, setting_value, created_at, updated_at) \
                 VALUES (?, ?, ?, ?, ?)",
            )
            .bind(&user_id)
            .bind(key)
            .bind(&serialized)
            .bind(now)
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to insert setting: {}", e)))?;
        }

        tracing::debug!(
            key,
            user = user_id.as_deref().unwrap_or("anonymous"),
            "setting updated"
        );
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
        if key.is_empty() {
            return Ok(false);
        }

        let result = sqlx::query(
            "DELETE FROM user_settings WHERE user_id IS ? AND setting_key = ?",
        )
        .bind(user_id.map(UserId::to_string))
        .bind(key)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to delete setting: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }
}
