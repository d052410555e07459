use axum::{Router, extract::State, response::IntoResponse, routing::get};
use axum_helpers::{HealthCheckFuture, run_health_checks};

use crate::state::AppState;

pub mod todos;

/// API routes without the `/api` prefix; `create_router` adds it.
///
/// Every sub-router has its state applied, so the result is stateless.
pub fn routes(state: &AppState) -> eyre::Result<Router> {
    Ok(Router::new().nest(domain_todos::entity::todo::Model::URL, todos::router(state)?))
}

/// `/ready` with a live database probe. Merged next to the stateless app router.
pub fn ready_router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(ready_handler))
        .with_state(state)
}

async fn ready_handler(State(state): State<AppState>) -> impl IntoResponse {
    let database: HealthCheckFuture<'_> = Box::pin(async {
        database::postgres::check_health(&state.db)
            .await
            .map_err(|e| e.to_string())
    });

    run_health_checks(vec![("database", database)]).await
}
