//! User Repository Port - Persistence for dashboard user accounts.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::domain::user::User;

/// Port for user account persistence.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Number of existing accounts. Zero means first-run setup is open.
    async fn count(&self) -> Result<u32, DomainError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    async fn insert(&self, user: &User) -> Result<(), DomainError>;

    async fn update_password(&self, id: &UserId, password_hash: &str)
        -> Result<(), DomainError>;

    async fn touch_last_login(&self, id: &UserId, at: Timestamp) -> Result<(), DomainError>;
}
