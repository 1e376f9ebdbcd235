//! Process startup: logging, store construction and the bootstrap routine.
//!
//! Every failure here is a [`StartupError`]; the binary logs it and exits
//! without binding the listener.

use std::net::SocketAddr;
use std::sync::Arc;

use blogpost_db::bootstrap::reset_and_seed;
use blogpost_db::observe::TracingObserver;
use blogpost_db::{ConnectionSource, Store};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{ConfigError, DatabaseConfig, LogFormat};

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to connect to database: {0}")]
    Connect(#[source] sqlx::Error),

    #[error("failed to reset and seed the blog table: {0}")]
    Bootstrap(#[source] sqlx::Error),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Install the global tracing subscriber.
pub fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "blogpost_api=debug,blogpost_db=debug,tower_http=debug".into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }
}

/// Build the store handle described by `config`.
///
/// With `max_connections == 0` no connection is opened here; the first one
/// is opened by the bootstrap routine.
pub async fn build_store(config: &DatabaseConfig) -> Result<Store, StartupError> {
    let options = config.connect_options()?;

    let source = if config.max_connections == 0 {
        tracing::info!("Using a dedicated database connection per operation");
        ConnectionSource::Direct(options)
    } else {
        let pool = blogpost_db::create_pool(options, config.max_connections, config.timeout())
            .await
            .map_err(StartupError::Connect)?;
        tracing::info!(max_connections = config.max_connections, "Database connection pool created");
        ConnectionSource::Pooled(pool)
    };

    let store = Store::new(source).with_timeout(config.timeout());
    Ok(if config.trace_ops {
        store.with_observer(Arc::new(TracingObserver))
    } else {
        store
    })
}

/// Build the store and run the reset-and-seed routine to completion.
pub async fn prepare_store(config: &DatabaseConfig) -> Result<Store, StartupError> {
    let store = build_store(config).await?;
    reset_and_seed(&store)
        .await
        .map_err(StartupError::Bootstrap)?;
    Ok(store)
}
