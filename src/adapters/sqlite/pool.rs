//! Connection pool setup and schema bootstrap.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::config::DatabaseConfig;
use crate::domain::foundation::{DomainError, ErrorCode};

/// Opens the SQLite pool and ensures the schema exists.
pub async fn connect(config: &DatabaseConfig) -> Result<SqlitePool, DomainError> {
    let options = SqliteConnectOptions::from_str(&config.url)
        .map_err(|e| DomainError::new(ErrorCode::DatabaseError, format!("Invalid database URL: {}", e)))?
        .create_if_missing(config.create_if_missing)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
        .connect_with(options)
        .await
        .map_err(|e| DomainError::new(ErrorCode::DatabaseError, format!("Failed to open database: {}", e)))?;

    ensure_schema(&pool).await?;
    Ok(pool)
}

/// Creates all tables if missing and seeds the local server row.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), DomainError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS user_settings (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id TEXT,
            setting_key TEXT NOT NULL,
            setting_value TEXT,
            created_at INTEGER NOT NULL,
            updated_at INTEGER NOT NULL,
            UNIQUE(user_id, setting_key)
        )
        "#,
    )
    .execute(pool)
    .await
    .map_err(schema_err)?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id TEXT PRIMARY KEY,
            username TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            created_at INTEGER NOT NULL,
            last_login INTEGER
        )
        "#,
    )
    .execute(pool)
    .await
    .map_err(schema_err)?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS servers (
            id TEXT PRIMARY KEY,
            label TEXT NOT NULL,
            api_key TEXT,
            api_key_created_at INTEGER
        )
        "#,
    )
    .execute(pool)
    .await
    .map_err(schema_err)?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS ports (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            server_id TEXT NOT NULL REFERENCES servers(id),
            owner TEXT NOT NULL,
            protocol TEXT NOT NULL DEFAULT 'tcp',
            host_ip TEXT NOT NULL,
            host_port INTEGER NOT NULL,
            container_id TEXT,
            UNIQUE(server_id, host_ip, host_port, protocol)
        )
        "#,
    )
    .execute(pool)
    .await
    .map_err(schema_err)?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS port_annotations (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            server_id TEXT NOT NULL,
            host_ip TEXT NOT NULL,
            host_port INTEGER NOT NULL,
            note TEXT,
            custom_label TEXT,
            hidden INTEGER NOT NULL DEFAULT 0,
            UNIQUE(server_id, host_ip, host_port)
        )
        "#,
    )
    .execute(pool)
    .await
    .map_err(schema_err)?;

    // The dashboard host itself is always a tracked server.
    sqlx::query("INSERT OR IGNORE INTO servers (id, label) VALUES ('local', 'Local Server')")
        .execute(pool)
        .await
        .map_err(schema_err)?;

    Ok(())
}

fn schema_err(e: sqlx::Error) -> DomainError {
    DomainError::new(
        ErrorCode::DatabaseError,
        format!("Failed to ensure schema: {}", e),
    )
}

#[cfg(test)]
pub(crate) async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    ensure_schema(&pool).await.unwrap();
    pool
}
