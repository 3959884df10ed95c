pub mod connection {
    use std::time::Duration;

    use sqlx::PgPool;

    use crate::error::persistence::PersistenceError;

    const SCHEMA: &str = include_str!("../../dbschema.sql");

    pub async fn create_sqlx_pool(database_url: &str) -> sqlx::PgPool {
        sqlx::postgres::PgPoolOptions::new()
            .min_connections(1)
            .max_connections(5)
            .acquire_timeout(Duration::from_millis(1000))
            .idle_timeout(Duration::from_millis(1000 * 30))
            .max_lifetime(Duration::from_millis(1000 * 10))
            .connect(database_url)
            .await
            .expect("Expect to create a database pool with a open connection")
    }

    /// Creates the catalog tables when they are not present yet.
    pub async fn create_schema(pool: &PgPool) -> Result<(), PersistenceError> {
        let mut trx = pool.begin().await?;
        for sttm in SCHEMA.split(';').filter(|sttm| !sttm.trim().is_empty()) {
            sqlx::query(sttm).execute(&mut trx).await?;
        }
        trx.commit().await?;

        Ok(())
    }
}

pub mod repository {
    use async_trait::async_trait;
    use futures::TryStreamExt;
    use sqlx::{PgPool, Row};

    use crate::{
        domain::{
            entity::{catalog::User, Entity, EntityId},
            repository::UserRepository,
        },
        error::persistence::PersistenceError,
    };

    const USER_COLUMNS: &str = "id, name, age, address";

    pub struct PgUserRepository {
        pool: PgPool,
    }

    impl PgUserRepository {
        pub fn new(pool: PgPool) -> Self {
            Self { pool }
        }

        async fn insert_user(&self, user: &User) -> Result<User, PersistenceError> {
            let row = sqlx::query(&format!(
                "INSERT INTO users (name, age, address) VALUES ($1, $2, $3) RETURNING {USER_COLUMNS}"
            ))
            .bind(user.name())
            .bind(user.age())
            .bind(user.address())
            .fetch_one(&self.pool)
            .await?;

            Ok(User::try_from(&row)?)
        }

        async fn update_user(&self, id: EntityId, user: &User) -> Result<User, PersistenceError> {
            let row = sqlx::query(&format!(
                "UPDATE users SET name = $1, age = $2, address = $3 WHERE id = $4 RETURNING {USER_COLUMNS}"
            ))
            .bind(user.name())
            .bind(user.age())
            .bind(user.address())
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(PersistenceError::NotFound)?;

            Ok(User::try_from(&row)?)
        }
    }

    #[async_trait]
    impl UserRepository for PgUserRepository {
        async fn save(&self, user: User) -> Result<User, PersistenceError> {
            match user.ident() {
                None => self.insert_user(&user).await,
                Some(id) => self.update_user(id, &user).await,
            }
        }

        async fn find_all(&self) -> Result<Vec<User>, PersistenceError> {
            let sttm = format!("SELECT {USER_COLUMNS} FROM users ORDER BY id");
            let mut rows = sqlx::query(&sttm).fetch(&self.pool);

            let mut users = Vec::new();
            while let Some(row) = rows.try_next().await? {
                users.push(User::try_from(&row)?);
            }

            Ok(users)
        }

        async fn find_by_id(&self, id: EntityId) -> Result<Option<User>, PersistenceError> {
            let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

            Ok(row.as_ref().map(User::try_from).transpose()?)
        }

        async fn find_by_name(&self, name: &str) -> Result<Option<User>, PersistenceError> {
            let row = sqlx::query(&format!(
                "SELECT {USER_COLUMNS} FROM users WHERE name = $1 ORDER BY id LIMIT 1"
            ))
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;

            Ok(row.as_ref().map(User::try_from).transpose()?)
        }

        async fn exists_by_id(&self, id: EntityId) -> Result<bool, PersistenceError> {
            let row = sqlx::query("SELECT EXISTS (SELECT 1 FROM users WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

            Ok(row.try_get(0)?)
        }

        async fn delete_by_id(&self, id: EntityId) -> Result<(), PersistenceError> {
            let result = sqlx::query("DELETE FROM users WHERE id = $1")
                .bind(id)
                .execute(&self.pool)
                .await?;

            if result.rows_affected() == 0 {
                return Err(PersistenceError::NotFound);
            }

            Ok(())
        }

        async fn count(&self) -> Result<i64, PersistenceError> {
            let row = sqlx::query("SELECT COUNT(*) FROM users")
                .fetch_one(&self.pool)
                .await?;

            Ok(row.try_get(0)?)
        }
    }
}
