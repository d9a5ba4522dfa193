use anyhow::Context;
use listings_service::api::{self, context::ApiContext};
use listings_service::config::{Config, Environment};
use listings_service::telemetry;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init();

    // Parse our configuration from the environment.
    let config = Config::from_env().context("expected to be able to generate config")?;

    tracing::info!("initialized config");

    let (min_connections, max_connections): (u32, u32) = match config.environment {
        Environment::Production => (5, 30),
        Environment::Develop => (3, 20),
        Environment::Local => (3, 10),
    };

    let db = PgPoolOptions::new()
        .min_connections(min_connections)
        .max_connections(max_connections)
        .connect(&config.database_url)
        .await
        .context("could not connect to the listings database")?;

    tracing::info!(
        min_connections,
        max_connections,
        "initialized listings database connection"
    );

    sqlx::migrate!("./migrations")
        .run(&db)
        .await
        .context("failed to run database migrations")?;

    tracing::info!("ran database migrations");

    let auth = auth_service_client::AuthServiceClient::new(config.auth_service_url.clone());
    tracing::info!(
        auth_service_url = %config.auth_service_url,
        "initialized auth service client"
    );

    api::setup_and_serve(ApiContext {
        db,
        config: Arc::new(config),
        auth: Arc::new(auth),
    })
    .await?;
    Ok(())
}
