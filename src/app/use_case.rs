pub mod catalog {
    use crate::{
        app::resource::catalog::{CreateUser, UpdateUser},
        domain::{
            entity::{catalog::User, EntityId},
            repository::UserRepository,
            validation::is_blank,
        },
        error::{
            app::ApplicationError,
            resource::{NotFoundError, ValidationError},
        },
    };

    mod validation {
        use super::*;
        use crate::error::resource::{ValidationErrorKind, ValidationFieldError};

        /// Presence of the fields a new user cannot be saved without.
        pub fn create_user(dto: &CreateUser) -> Result<(String, i32), ValidationError> {
            let mut errors = Vec::new();

            if is_blank(dto.name.as_deref()) {
                errors.push(ValidationFieldError::new(
                    "name",
                    vec![ValidationErrorKind::Required],
                ));
            }
            if dto.age.is_none() {
                errors.push(ValidationFieldError::new(
                    "age",
                    vec![ValidationErrorKind::Required],
                ));
            }

            match (&dto.name, dto.age) {
                (Some(name), Some(age)) if errors.is_empty() => Ok((name.clone(), age)),
                _ => Err(ValidationError::from_resource::<CreateUser>(errors)),
            }
        }
    }

    /// User catalog operations over a storage gateway.
    pub struct UserService<R> {
        repository: R,
    }

    impl<R: UserRepository> UserService<R> {
        pub fn new(repository: R) -> Self {
            Self { repository }
        }

        pub async fn create(&self, dto: CreateUser) -> Result<User, ApplicationError> {
            let (name, age) = validation::create_user(&dto)?;

            let user = self
                .repository
                .save(User::new(name, age, dto.address))
                .await?;

            tracing::info!(user = %user, "user created");
            Ok(user)
        }

        pub async fn list_all(&self) -> Result<Vec<User>, ApplicationError> {
            Ok(self.repository.find_all().await?)
        }

        pub async fn get_by_id(&self, id: EntityId) -> Result<Option<User>, ApplicationError> {
            Ok(self.repository.find_by_id(id).await?)
        }

        pub async fn get_by_name(&self, name: &str) -> Result<Option<User>, ApplicationError> {
            Ok(self.repository.find_by_name(name).await?)
        }

        /// Overwrites the supplied fields of a stored user.
        ///
        /// A blank name is ignored instead of being applied.
        pub async fn update(&self, id: EntityId, dto: UpdateUser) -> Result<User, ApplicationError> {
            let mut user = self
                .repository
                .find_by_id(id)
                .await?
                .ok_or_else(|| NotFoundError::from_resource::<User>(id))?;

            if let Some(name) = dto.name.filter(|name| !is_blank(Some(name))) {
                user.set_name(name);
            }
            if let Some(age) = dto.age {
                user.set_age(age);
            }
            if let Some(address) = dto.address {
                user.set_address(address);
            }

            let user = self.repository.save(user).await?;

            tracing::info!(user = %user, "user updated");
            Ok(user)
        }

        pub async fn delete(&self, id: EntityId) -> Result<(), ApplicationError> {
            if !self.repository.exists_by_id(id).await? {
                return Err(NotFoundError::from_resource::<User>(id).into());
            }

            self.repository.delete_by_id(id).await?;

            tracing::info!(user_id = id, "user deleted");
            Ok(())
        }

        pub async fn count(&self) -> Result<i64, ApplicationError> {
            Ok(self.repository.count().await?)
        }
    }

}
