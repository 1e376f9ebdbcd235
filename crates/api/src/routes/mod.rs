pub mod blog;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the full route tree.
///
/// ```text
/// /health                 service and database health
///
/// /                       list
/// /blog                   create
/// /blog/{id}              get, update, delete
/// ```
pub fn app_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(blog::router())
}
