use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TodoError {
    #[error("Todo not found: {0}")]
    NotFound(i64),

    /// The authenticated caller has no stored user row
    #[error("User not found: {0}")]
    UserNotFound(i64),

    /// A stored todo whose owner could not be joined
    #[error("Todo {0} has no resolvable owner")]
    OrphanedTodo(i64),

    /// Weather provider failed; creation is aborted
    #[error("Weather service unavailable: {0}")]
    Weather(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type TodoResult<T> = Result<T, TodoError>;

impl From<DbErr> for TodoError {
    fn from(err: DbErr) -> Self {
        TodoError::Database(err.to_string())
    }
}

impl From<reqwest::Error> for TodoError {
    fn from(err: reqwest::Error) -> Self {
        TodoError::Weather(err.to_string())
    }
}

impl From<TodoError> for AppError {
    fn from(err: TodoError) -> Self {
        match err {
            TodoError::NotFound(id) => AppError::NotFound(format!("Todo {} not found", id)),
            TodoError::UserNotFound(id) => AppError::BadRequest(format!("User {} not found", id)),
            TodoError::Validation(msg) => AppError::BadRequest(msg),
            TodoError::Weather(msg) => {
                AppError::ServiceUnavailable(format!("Weather service unavailable: {}", msg))
            }
            err @ (TodoError::OrphanedTodo(_) | TodoError::Database(_)) => {
                AppError::InternalServerError(err.to_string())
            }
        }
    }
}

impl IntoResponse for TodoError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
