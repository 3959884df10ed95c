use async_trait::async_trait;

use super::entity::{catalog::User, EntityId};
use crate::error::persistence::PersistenceError;

/// Storage gateway of catalogued users.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Inserts a transient user or overwrites every column of a saved one.
    ///
    /// Returns the stored user with its identifier populated. Saving a user
    /// whose row no longer exists fails with [`PersistenceError::NotFound`].
    async fn save(&self, user: User) -> Result<User, PersistenceError>;

    async fn find_all(&self) -> Result<Vec<User>, PersistenceError>;

    async fn find_by_id(&self, id: EntityId) -> Result<Option<User>, PersistenceError>;

    /// Exact, case sensitive, match on the user name.
    ///
    /// Names are not unique, the match with the lowest id wins.
    async fn find_by_name(&self, name: &str) -> Result<Option<User>, PersistenceError>;

    async fn exists_by_id(&self, id: EntityId) -> Result<bool, PersistenceError>;

    /// Fails with [`PersistenceError::NotFound`] when there is no such row.
    async fn delete_by_id(&self, id: EntityId) -> Result<(), PersistenceError>;

    async fn count(&self) -> Result<i64, PersistenceError>;
}
