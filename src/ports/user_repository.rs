//! User repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::user::User;

/// Repository port for owner profiles. Users are never deleted.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert or replace a user.
    ///
    /// # Errors
    ///
    /// - `StorageError` on persistence failure
    async fn save(&self, user: &User) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError>;
}
