use std::sync::Arc;

use salvo::{listener::TcpListener, Server};

use user_catalog::{
    app::use_case::catalog::UserService,
    config::env_var,
    infra::{
        database::{connection, repository::PgUserRepository},
        router,
    },
};

#[tokio::main]
async fn main() {
    let env = env_var::get();
    tracing_subscriber::fmt().with_max_level(env.log_level).init();

    let pool = connection::create_sqlx_pool(&env.database_url).await;
    connection::create_schema(&pool)
        .await
        .expect("Expect to create the catalog schema");

    let service = Arc::new(UserService::new(PgUserRepository::new(pool)));

    let address = format!("0.0.0.0:{}", env.port);
    tracing::info!("listening on {address}");
    let listener = TcpListener::bind(&address);
    Server::new(listener).serve(router::app(service)).await;
}
