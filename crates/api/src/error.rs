use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use blogpost_core::error::CoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Handlers are the only place store results become HTTP statuses; this
/// type is how they do it.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `blogpost_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The store was unreachable or rejected a statement.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            // Not found is an expected outcome: bare 404, no body.
            AppError::Core(CoreError::NotFound { entity, id }) => {
                tracing::debug!(entity, id, "Entity not found");
                return StatusCode::NOT_FOUND.into_response();
            }
            AppError::Core(CoreError::Validation(msg)) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg)
            }
            AppError::Database(err) => {
                tracing::error!(error = %err, "Database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    err.to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
