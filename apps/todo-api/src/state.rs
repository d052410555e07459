//! Shared application state, cloned into routers at startup.

use axum_helpers::JwtAuth;
use database::postgres::DatabaseConnection;

#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    /// PostgreSQL connection pool (cheap to clone)
    pub db: DatabaseConnection,
    pub jwt_auth: JwtAuth,
}
