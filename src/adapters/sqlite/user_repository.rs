//! SQLite implementation of UserRepository.

use async_trait::async_trait;
use sqlx::{Row, SqlitePool};
use std::str::FromStr;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::user::User;
use crate::ports::UserRepository;

/// SQLite-backed user account repository.
#[derive(Clone)]
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    /// Creates a new SqliteUserRepository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn row_to_user(row: sqlx::sqlite::SqliteRow) -> Result<User, DomainError> {
    let id: String = row.get("id");
    let id = UserId::from_str(&id)
        .map_err(|e| DomainError::new(ErrorCode::DatabaseError, format!("Corrupt user id: {}", e)))?;
    let last_login: Option<i64> = row.get("last_login");
    Ok(User {
        id,
        username: row.get("username"),
        password_hash: row.get("password_hash"),
        created_at: Timestamp::from_unix_millis(row.get("created_at")),
        last_login: last_login.map(Timestamp::from_unix_millis),
    })
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn count(&self) -> Result<u32, DomainError> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to count users: {}", e)))?;
        let count: i64 = row.get("count");
        Ok(count as u32)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let row = sqlx::query("SELECT * FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to fetch user: {}", e)))?;
        row.map(row_to_user).transpose()
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let row = sqlx::query("SELECT * FROM users WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to fetch user: {}", e)))?;
        row.map(row_to_user).transpose()
    }

    async fn insert(&self, user: &User) -> Result<(), DomainError> {
        sqlx::query(
            "INSERT INTO users (id, username, password_hash, created_at, last_login) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(user.id.to_string())
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(user.created_at.as_unix_millis())
        .bind(user.last_login.map(|t| t.as_unix_millis()))
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to insert user: {}", e)))?;
        Ok(())
    }

    async fn update_password(
        &self,
        id: &UserId,
        password_hash: &str,
    ) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE users SET password_hash = ? WHERE id = ?")
            .bind(password_hash)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to update password: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::UserNotFound,
                format!("User not found: {}", id),
            ));
        }
        Ok(())
    }

    async fn touch_last_login(&self, id: &UserId, at: Timestamp) -> Result<(), DomainError> {
        sqlx::query("UPDATE users SET last_login = ? WHERE id = ?")
            .bind(at.as_unix_millis())
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to update last login: {}", e)))?;
        Ok(())
    }
}
