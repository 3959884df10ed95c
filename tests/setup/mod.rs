#![allow(dead_code)]

use std::{sync::Arc, time::Duration};

use reqwest::{
    header::{HeaderMap, HeaderValue},
    Client,
};
use salvo::{listener::TcpListener, Server};
use url::Url;

use user_catalog::{
    app::use_case::catalog::UserService,
    config::env_var::EnvVar,
    domain::repository::UserRepository,
    infra::{database::connection, memory::MemoryUserRepository, router},
};

/// Starts a catalog service backed by an empty in-memory store.
pub async fn setup_test() -> (Client, Url) {
    dotenv::dotenv().ok();
    (create_client(), spawn_service(MemoryUserRepository::default()))
}

/// Connects to the database named by the environment and recreates the
/// catalog schema on it, or `None` when no database is configured.
pub async fn setup_database() -> Option<sqlx::PgPool> {
    dotenv::dotenv().ok();
    let env = match EnvVar::from_lookup(|key| std::env::var(key).ok()) {
        Ok(env) => env,
        Err(err) => {
            eprintln!("database tests skipped: {err}");
            return None;
        }
    };

    let pool = connection::create_sqlx_pool(&env.database_url).await;
    sqlx::query("DROP TABLE IF EXISTS users")
        .execute(&pool)
        .await
        .unwrap();
    connection::create_schema(&pool).await.unwrap();

    Some(pool)
}

fn free_port() -> u16 {
    std::net::TcpListener::bind("127.0.0.1:0")
        .and_then(|listener| listener.local_addr())
        .map(|addr| addr.port())
        .expect("Expect a free loopback port")
}

pub fn spawn_service<R: UserRepository>(repository: R) -> Url {
    let address = format!("127.0.0.1:{}", free_port());
    let listener = TcpListener::bind(&address);

    let service = Arc::new(UserService::new(repository));
    tokio::spawn(Server::new(listener).serve(router::app(service)));

    Url::parse(format!("http://{address}").as_str()).unwrap()
}

pub fn create_client() -> reqwest::Client {
    let mut headers = HeaderMap::new();
    headers.append("accept", HeaderValue::from_static("application/json"));

    let connect_timeout = 1000 * 5; // 5 sec
    let timeout = 1000 * 10; // 10 sec

    reqwest::Client::builder()
        .connect_timeout(Duration::from_millis(connect_timeout))
        .timeout(Duration::from_millis(timeout))
        .pool_max_idle_per_host(5)
        .default_headers(headers)
        .brotli(true)
        .gzip(true)
        .build()
        .expect("Expect to create a http client")
}
