pub mod catalog {
    use serde::{Deserialize, Serialize};

    use crate::{
        base::{resource_id, ResourceID},
        domain::{
            entity::EntityId,
            validation::{check_address, check_age, check_name, Validate},
        },
        error::resource::{ValidationError, ValidationFieldError},
    };

    /// User fields sent on creation.
    ///
    /// Every field is optional at the wire level; required fields are
    /// reported by validation instead of failing deserialization.
    #[derive(Debug, Clone, Default, Serialize, Deserialize)]
    pub struct CreateUser {
        #[serde(default, alias = "nome")]
        pub name: Option<String>,
        #[serde(default, alias = "idade")]
        pub age: Option<i32>,
        #[serde(default, alias = "endereco")]
        pub address: Option<String>,
    }

    resource_id!(CreateUser, "catalog::CreateUser");

    /// Partial update of a user, absent fields are left untouched.
    #[derive(Debug, Clone, Default, Serialize, Deserialize)]
    pub struct UpdateUser {
        #[serde(default, alias = "nome")]
        pub name: Option<String>,
        #[serde(default, alias = "idade")]
        pub age: Option<i32>,
        #[serde(default, alias = "endereco")]
        pub address: Option<String>,
    }

    resource_id!(UpdateUser, "catalog::UpdateUser");

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct UserResponse {
        pub id: Option<EntityId>,
        pub name: String,
        pub age: i32,
        pub address: Option<String>,
    }

    fn collect<R: ResourceID>(
        checks: impl IntoIterator<Item = Option<ValidationFieldError>>,
    ) -> Result<(), ValidationError> {
        let fields: Vec<_> = checks.into_iter().flatten().collect();
        if fields.is_empty() {
            return Ok(());
        }
        Err(ValidationError::from_resource::<R>(fields))
    }

    impl Validate for CreateUser {
        fn validate(&self) -> Result<(), ValidationError> {
            collect::<Self>([
                check_name(self.name.as_deref(), true),
                check_age(self.age, true),
                check_address(self.address.as_deref()),
            ])
        }
    }

    impl Validate for UpdateUser {
        fn validate(&self) -> Result<(), ValidationError> {
            collect::<Self>([
                check_name(self.name.as_deref(), false),
                check_age(self.age, false),
                check_address(self.address.as_deref()),
            ])
        }
    }

}
