use axum::{Router, middleware};
use axum_helpers::jwt_auth_middleware;
use domain_todos::{HttpWeatherClient, PgTodoRepository, TodoService, handlers};

use crate::state::AppState;

pub fn router(state: &AppState) -> eyre::Result<Router> {
    let repository = PgTodoRepository::new(state.db.clone());
    let weather = HttpWeatherClient::new(&state.config.weather)
        .map_err(|e| eyre::eyre!("Failed to build weather client: {}", e))?;

    let service = TodoService::new(repository, weather);

    Ok(handlers::router(service).layer(middleware::from_fn_with_state(
        state.jwt_auth.clone(),
        jwt_auth_middleware,
    )))
}
