//! SQLite implementation of ServerRegistry.

use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

use crate::domain::foundation::{DomainError, ServerId, Timestamp};
use crate::ports::{ServerRecord, ServerRegistry};

/// SQLite-backed server registry.
#[derive(Clone)]
pub struct SqliteServerRegistry {
    pool: SqlitePool,
}

impl SqliteServerRegistry {
    /// Creates a new SqliteServerRegistry.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn row_to_record(row: sqlx::sqlite::SqliteRow) -> Result<ServerRecord, DomainError> {
    let id: String = row.get("id");
    let created_at: Option<i64> = row.get("api_key_created_at");
    Ok(ServerRecord {
        id: ServerId::new(id)?,
        label: row.get("label"),
        api_key_hash: row.get("api_key"),
        api_key_created_at: created_at.map(Timestamp::from_unix_millis),
    })
}

#[async_trait]
impl ServerRegistry for SqliteServerRegistry {
    async fn find(&self, id: &ServerId) -> Result<Option<ServerRecord>, DomainError> {
        let row = sqlx::query("SELECT * FROM servers WHERE id = ?")
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to fetch server: {}", e)))?;
        row.map(row_to_record).transpose()
    }

    async fn set_api_key(
        &self,
        id: &ServerId,
        hash: &str,
        created_at: Timestamp,
    ) -> Result<(), DomainError> {
        sqlx::query("UPDATE servers SET api_key = ?, api_key_created_at = ? WHERE id = ?")
            .bind(hash)
            .bind(created_at.as_unix_millis())
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to store API key: {}", e)))?;
        Ok(())
    }

    async fn clear_api_key(&self, id: &ServerId) -> Result<bool, DomainError> {
        let result = sqlx::query(
            "UPDATE servers SET api_key = NULL, api_key_created_at = NULL \
             WHERE id = ? AND api_key IS NOT NULL",
        )
        .bind(id.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to revoke API key: {}", e)))?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_with_api_keys(&self) -> Result<Vec<ServerRecord>, DomainError> {
        let rows = sqlx::query("SELECT * FROM servers WHERE api_key IS NOT NULL")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to list servers: {}", e)))?;
        rows.into_iter().map(row_to_record).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sqlite::pool::test_pool;

    async fn registry() -> SqliteServerRegistry {
        SqliteServerRegistry::new(test_pool().await)
    }

    #[tokio::test]
    async fn local_server_exists_without_key() {
        let registry = registry().await;
        let server = registry.find(&ServerId::local()).await.unwrap().unwrap();
        assert_eq!(server.label, "Local Server");
        assert!(server.api_key_hash.is_none());
        assert!(server.api_key_created_at.is_none());
    }

    #[tokio::test]
    async fn unknown_server_returns_none() {
        let registry = registry().await;
        let id = ServerId::new("ghost").unwrap();
        assert!(registry.find(&id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn set_and_clear_api_key() {
        let registry = registry().await;
        let local = ServerId::local();
        let at = Timestamp::from_unix_millis(1_700_000_000_000);

        registry.set_api_key(&local, "hash", at).await.unwrap();
        let server = registry.find(&local).await.unwrap().unwrap();
        assert_eq!(server.api_key_hash.as_deref(), Some("hash"));
        assert_eq!(server.api_key_created_at, Some(at));

        assert!(registry.clear_api_key(&local).await.unwrap());
        assert!(!registry.clear_api_key(&local).await.unwrap());
        let server = registry.find(&local).await.unwrap().unwrap();
        assert!(server.api_key_hash.is_none());
    }

    #[tokio::test]
    async fn list_with_api_keys_filters() {
        let registry = registry().await;
        assert!(registry.list_with_api_keys().await.unwrap().is_empty());

        registry
            .set_api_key(&ServerId::local(), "hash", Timestamp::now())
            .await
            .unwrap();
        let servers = registry.list_with_api_keys().await.unwrap();
        assert_eq!(servers.len(), 1);
        assert!(servers[0].id.is_local());
    }
}
