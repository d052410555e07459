use axum_helpers::{JwtAuth, create_production_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::common::RetryConfig;
use database::postgres;
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Before any fallible operation
    install_color_eyre();

    let config = Config::from_env()?;

    init_tracing(&config.environment);

    let db = postgres::connect_with_retry(config.database.clone(), RetryConfig::startup())
        .await
        .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?;

    postgres::run_migrations::<migration::Migrator>(&db, config.app.name)
        .await
        .map_err(|e| eyre::eyre!("Migrations failed: {}", e))?;

    let jwt_auth = JwtAuth::new(&config.jwt);

    let state = AppState {
        config,
        db,
        jwt_auth,
    };

    let api_routes = api::routes(&state)?;

    // Docs, fallback and middleware around the `/api` routes
    let router = axum_helpers::create_router::<openapi::ApiDoc>(api_routes)?;

    // /health: liveness with name/version, /ready: database probe
    let app = router
        .merge(health_router(state.config.app.clone()))
        .merge(api::ready_router(state.clone()));

    info!(
        address = %state.config.server.address(),
        "Starting todo API (30s shutdown timeout)"
    );

    create_production_app(
        app,
        &state.config.server,
        Duration::from_secs(30),
        async move {
            info!("Shutting down: closing database connections");
            match state.db.close().await {
                Ok(_) => info!("PostgreSQL connection closed successfully"),
                Err(e) => tracing::error!("Error closing PostgreSQL: {}", e),
            }
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Todo API shutdown complete");
    Ok(())
}
