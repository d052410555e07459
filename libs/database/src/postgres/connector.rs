use sea_orm::{Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use super::PostgresConfig;
use crate::common::{DatabaseError, DatabaseResult, RetryConfig, retry_with_backoff};

pub async fn connect(config: PostgresConfig) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(config.into_connect_options()).await?;
    info!("Connected to PostgreSQL");
    Ok(db)
}

/// Connect, retrying with exponential backoff while the server is unreachable
pub async fn connect_with_retry(
    config: PostgresConfig,
    retry: RetryConfig,
) -> DatabaseResult<DatabaseConnection> {
    retry_with_backoff(|| connect(config.clone()), &retry)
        .await
        .map_err(|e| DatabaseError::ConnectionFailed {
            attempts: retry.max_retries + 1,
            reason: e.to_string(),
        })
}

/// Apply all pending migrations of `M`
pub async fn run_migrations<M: MigratorTrait>(
    db: &DatabaseConnection,
    app_name: &str,
) -> DatabaseResult<()> {
    info!(app = app_name, "Running database migrations");
    M::up(db, None)
        .await
        .map_err(|e| DatabaseError::MigrationFailed {
            app: app_name.to_string(),
            reason: e.to_string(),
        })?;
    info!(app = app_name, "Migrations completed");
    Ok(())
}
