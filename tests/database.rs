use pretty_assertions::assert_eq;
use reqwest::StatusCode;
use serde_json::{json, Value};
use serial_test::serial;

use user_catalog::{
    domain::{
        entity::{catalog::User, Entity},
        repository::UserRepository,
    },
    error::persistence::PersistenceError,
    infra::database::{connection, repository::PgUserRepository},
};

mod setup;

macro_rules! pg_repository {
    () => {
        match setup::setup_database().await {
            Some(pool) => PgUserRepository::new(pool),
            None => return,
        }
    };
}

fn user(name: &str, age: i32, address: Option<&str>) -> User {
    User::new(name.into(), age, address.map(Into::into))
}

#[tokio::test]
#[serial]
async fn save_inserts_then_updates() {
    let repository = pg_repository!();

    let created = repository
        .save(user("Ana", 30, Some("Rua A")))
        .await
        .unwrap();
    let id = created.ident().unwrap();
    assert_eq!(created.name(), "Ana");
    assert_eq!(*created.age(), 30);
    assert_eq!(created.address().as_deref(), Some("Rua A"));

    let mut changed = created.clone();
    changed.set_age(31);
    changed.set_address("Rua B".into());
    let updated = repository.save(changed).await.unwrap();

    assert_eq!(updated.ident(), Some(id));
    assert_eq!(*updated.age(), 31);
    assert_eq!(repository.find_by_id(id).await.unwrap(), Some(updated));
    assert_eq!(repository.count().await.unwrap(), 1);
}

#[tokio::test]
#[serial]
async fn save_of_a_vanished_row() {
    let repository = pg_repository!();

    let created = repository.save(user("Ana", 30, None)).await.unwrap();
    repository
        .delete_by_id(created.ident().unwrap())
        .await
        .unwrap();

    let err = repository.save(created).await.unwrap_err();
    assert!(matches!(err, PersistenceError::NotFound));
    assert_eq!(repository.count().await.unwrap(), 0);
}

#[tokio::test]
#[serial]
async fn lookups_decode_rows() {
    let repository = pg_repository!();

    let first = repository.save(user("Ana", 30, None)).await.unwrap();
    let other = repository
        .save(user("Bia", 25, Some("Rua C")))
        .await
        .unwrap();
    repository.save(user("Ana", 41, None)).await.unwrap();

    assert_eq!(
        repository.find_by_name("Ana").await.unwrap(),
        Some(first.clone())
    );
    assert_eq!(repository.find_by_name("ana").await.unwrap(), None);
    assert!(repository.exists_by_id(other.ident().unwrap()).await.unwrap());
    assert!(!repository.exists_by_id(-1).await.unwrap());
    assert_eq!(repository.find_by_id(i64::MAX).await.unwrap(), None);
    assert_eq!(repository.count().await.unwrap(), 3);

    let all = repository.find_all().await.unwrap();
    let ids: Vec<_> = all.iter().map(|user| user.ident().unwrap()).collect();
    let mut sorted = ids.clone();
    sorted.sort();
    assert_eq!(ids, sorted);
    assert_eq!(all[0], first);
    assert_eq!(all[1].address().as_deref(), Some("Rua C"));
}

#[tokio::test]
#[serial]
async fn delete_missing_row() {
    let repository = pg_repository!();

    let err = repository.delete_by_id(42).await.unwrap_err();
    assert!(matches!(err, PersistenceError::NotFound));
}

#[tokio::test]
#[serial]
async fn schema_creation_is_repeatable() {
    let pool = match setup::setup_database().await {
        Some(pool) => pool,
        None => return,
    };
    let repository = PgUserRepository::new(pool.clone());
    repository.save(user("Ana", 30, None)).await.unwrap();

    connection::create_schema(&pool).await.unwrap();

    assert_eq!(repository.count().await.unwrap(), 1);
}

#[tokio::test]
#[serial]
async fn user_lifecycle_over_postgres() {
    let repository = pg_repository!();
    let client = setup::create_client();
    let url = setup::spawn_service(repository);

    let res = client
        .post(url.join("/users").unwrap())
        .json(&json!({"name": "Ana", "age": 30}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: Value = res.json().await.unwrap();
    assert_eq!(created["address"], Value::Null);
    let id = created["id"].clone();

    let res = client
        .put(url.join(&format!("/users/{id}")).unwrap())
        .json(&json!({"age": 31}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let updated: Value = res.json().await.unwrap();
    assert_eq!(updated["name"], "Ana");
    assert_eq!(updated["age"], 31);

    let total: i64 = client
        .get(url.join("/users/stats/total").unwrap())
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(total, 1);

    let res = client
        .delete(url.join(&format!("/users/{id}")).unwrap())
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = client
        .get(url.join(&format!("/users/{id}")).unwrap())
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
