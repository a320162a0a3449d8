//! Products API - REST server backed by PostgreSQL

use axum_helpers::server::{close_postgres, create_production_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;

use config::Config;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!("Connecting to PostgreSQL");

    let db =
        database::postgres::connect_from_config_with_retry(config.postgres.clone(), None).await?;

    info!("Successfully connected to PostgreSQL");

    // Build REST router
    let api_routes = api::routes(db.clone());
    let router = axum_helpers::create_router::<openapi::ApiDoc>(api_routes).await?;
    let app = router
        .merge(health_router(config.app))
        .merge(api::readiness_router(db.clone()));

    info!("Starting Products API on port {}", config.server.port);

    // Run server with graceful shutdown
    create_production_app(app, &config.server, Duration::from_secs(30), async move {
        info!("Shutting down: closing PostgreSQL connection");
        close_postgres(db, "products").await;
    })
    .await?;

    info!("Products API shutdown complete");
    Ok(())
}
