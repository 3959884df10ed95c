use std::fmt;

use super::{impl_entity, state_ref, EntityId};
use crate::base::resource_id;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserState {
    pub(in crate::domain) name: String,
    pub(in crate::domain) age: i32,
    pub(in crate::domain) address: Option<String>,
}

/// A catalogued user.
///
/// `id` stays empty until the user is saved for the first time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub(in crate::domain) id: Option<EntityId>,
    pub(in crate::domain) state: UserState,
}

impl_entity!(User);
resource_id!(User, "catalog::User");

impl User {
    state_ref!(name, String);
    state_ref!(age, i32);
    state_ref!(address, Option<String>);

    pub fn new(name: String, age: i32, address: Option<String>) -> Self {
        Self {
            id: None,
            state: UserState { name, age, address },
        }
    }

    pub fn restore(id: EntityId, state: UserState) -> Self {
        Self {
            id: Some(id),
            state,
        }
    }

    pub fn set_name(&mut self, name: String) {
        self.state.name = name;
    }

    pub fn set_age(&mut self, age: i32) {
        self.state.age = age;
    }

    pub fn set_address(&mut self, address: String) {
        self.state.address = Some(address);
    }

    /// Copy of this user carrying the identifier assigned by storage.
    pub fn with_id(self, id: EntityId) -> Self {
        Self::restore(id, self.state)
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = self.id.map(|id| id.to_string());
        write!(
            f,
            "User{{id={}, name='{}', age={}, address='{}'}}",
            id.as_deref().unwrap_or("null"),
            self.state.name,
            self.state.age,
            self.state.address.as_deref().unwrap_or("null"),
        )
    }
}
