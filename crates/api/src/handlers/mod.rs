//! Request handlers.
//!
//! Each handler makes exactly one store call and maps its outcome to an HTTP
//! response via [`AppError`](crate::error::AppError).

pub mod blog;
