use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[cfg(feature = "postgres")]
    #[error(transparent)]
    Query(#[from] sea_orm::DbErr),

    /// Every connection attempt failed
    #[error("could not connect after {attempts} attempts: {reason}")]
    ConnectionFailed { attempts: u32, reason: String },

    #[error("readiness probe failed: {0}")]
    HealthCheckFailed(String),

    #[error("migrations for {app} failed: {reason}")]
    MigrationFailed { app: String, reason: String },
}

pub type DatabaseResult<T> = Result<T, DatabaseError>;
