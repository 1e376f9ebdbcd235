//! Route definitions for the blog post resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::blog;
use crate::state::AppState;

/// Routes mounted at the service root.
///
/// ```text
/// GET    /              -> list
/// POST   /blog          -> create
/// GET    /blog/{id}     -> get_by_id
/// PUT    /blog/{id}     -> update
/// DELETE /blog/{id}     -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(blog::list))
        .route("/blog", post(blog::create))
        .route(
            "/blog/{id}",
            get(blog::get_by_id).put(blog::update).delete(blog::delete),
        )
}
