use sqlx::{postgres::PgRow, Row};

use super::entity::catalog::{User, UserState};

impl TryFrom<&PgRow> for UserState {
    type Error = sqlx::Error;

    fn try_from(row: &PgRow) -> Result<Self, Self::Error> {
        Ok(Self {
            name: row.try_get("name")?,
            age: row.try_get("age")?,
            address: row.try_get("address")?,
        })
    }
}

impl TryFrom<&PgRow> for User {
    type Error = sqlx::Error;

    fn try_from(row: &PgRow) -> Result<Self, Self::Error> {
        Ok(Self::restore(row.try_get("id")?, row.try_into()?))
    }
}
