//! Positive integer path parameter extractor.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

/// Extractor for a single `i64` primary key in the path.
///
/// Anything that is not a positive integer is rejected with `INVALID_ID`.
///
/// ```ignore
/// async fn get_todo(IdPath(id): IdPath) -> String {
///     format!("Todo {}", id)
/// }
///
/// let app = Router::new().route("/todos/{id}", get(get_todo));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdPath(pub i64);

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        match raw.parse::<i64>() {
            Ok(id) if id > 0 => Ok(IdPath(id)),
            _ => Err(AppError::InvalidId(raw)),
        }
    }
}
