//! In-process storage gateway.
//!
//! Mirrors the observable behavior of the PostgreSQL repository: identifiers
//! come from a monotonic sequence, scans are ordered by id and name lookups
//! return the lowest matching id.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    domain::{
        entity::{catalog::User, Entity, EntityId},
        repository::UserRepository,
    },
    error::persistence::PersistenceError,
};

#[derive(Debug, Default)]
struct Table {
    sequence: EntityId,
    rows: BTreeMap<EntityId, User>,
}

#[derive(Debug, Default)]
pub struct MemoryUserRepository {
    table: Mutex<Table>,
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn save(&self, user: User) -> Result<User, PersistenceError> {
        let mut table = self.table.lock().await;

        let id = match user.ident() {
            Some(id) if table.rows.contains_key(&id) => id,
            Some(_) => return Err(PersistenceError::NotFound),
            None => {
                table.sequence += 1;
                table.sequence
            }
        };

        let user = user.with_id(id);
        table.rows.insert(id, user.clone());
        Ok(user)
    }

    async fn find_all(&self) -> Result<Vec<User>, PersistenceError> {
        Ok(self.table.lock().await.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: EntityId) -> Result<Option<User>, PersistenceError> {
        Ok(self.table.lock().await.rows.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<User>, PersistenceError> {
        let table = self.table.lock().await;
        Ok(table
            .rows
            .values()
            .find(|user| user.name() == name)
            .cloned())
    }

    async fn exists_by_id(&self, id: EntityId) -> Result<bool, PersistenceError> {
        Ok(self.table.lock().await.rows.contains_key(&id))
    }

    async fn delete_by_id(&self, id: EntityId) -> Result<(), PersistenceError> {
        self.table
            .lock()
            .await
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or(PersistenceError::NotFound)
    }

    async fn count(&self) -> Result<i64, PersistenceError> {
        Ok(self.table.lock().await.rows.len() as i64)
    }
}
