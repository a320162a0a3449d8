//! API routes module

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use axum_helpers::server::{HealthCheckFuture, run_health_checks};
use domain_products::{PgProductRepository, ProductService, handlers};
use sea_orm::DatabaseConnection;
use serde_json::Value;

/// Create all API routes backed by the shared connection pool
pub fn routes(db: DatabaseConnection) -> Router {
    let repository = PgProductRepository::new(db);
    let service = ProductService::new(repository);

    Router::new().nest("/products", handlers::router(service))
}

/// Readiness endpoint that verifies the database connection
async fn ready(
    State(db): State<DatabaseConnection>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    let checks = vec![(
        "postgres",
        Box::pin(async {
            database::postgres::check_health(&db)
                .await
                .map_err(|e| e.to_string())
        }) as HealthCheckFuture,
    )];

    run_health_checks(checks).await
}

/// Router exposing `/ready` for Kubernetes readiness probes
pub fn readiness_router(db: DatabaseConnection) -> Router {
    Router::new().route("/ready", get(ready)).with_state(db)
}
