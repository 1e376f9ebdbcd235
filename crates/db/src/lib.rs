//! Store gateway for the `blog` table.
//!
//! Every operation runs inside [`Store::with_connection`], which opens (or
//! acquires) a connection, runs one unit of work and releases the connection
//! on every exit path.

use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};

pub mod bootstrap;
pub mod models;
pub mod observe;
pub mod repositories;
pub mod store;

pub use store::{ConnectionSource, Store, DEFAULT_OPERATION_TIMEOUT};

pub type DbPool = sqlx::PgPool;

/// Create a bounded connection pool from connect options.
///
/// Waiting for a free connection (or for the first one to open) gives up
/// after `acquire_timeout`.
pub async fn create_pool(
    options: PgConnectOptions,
    max_connections: u32,
    acquire_timeout: Duration,
) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(acquire_timeout)
        .connect_with(options)
        .await
}

/// Run a trivial query to confirm the store is reachable.
pub async fn health_check(store: &Store) -> Result<(), sqlx::Error> {
    store
        .with_connection("health_check", |conn| {
            Box::pin(async move {
                sqlx::query("SELECT 1").execute(conn).await?;
                Ok(())
            })
        })
        .await
}
