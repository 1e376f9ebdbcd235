//! Request extractors with project-specific rejections.

use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use blogpost_core::error::CoreError;

use crate::error::AppError;

/// `axum::Json` whose rejection is an [`AppError`] validation failure (400),
/// so malformed bodies never reach the store.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Core(CoreError::Validation(rejection.body_text()))
    }
}
