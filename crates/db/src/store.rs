use std::fmt;
use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::future::BoxFuture;
use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::{Connection, PgPool};

use crate::observe::{NoopObserver, StoreObserver};

/// Upper bound on a single store operation unless overridden.
pub const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_secs(10);

/// Where the store gets its connections from.
#[derive(Debug, Clone)]
pub enum ConnectionSource {
    /// Open a fresh connection for each operation and close it afterwards.
    Direct(PgConnectOptions),
    /// Borrow a connection from a bounded pool for the length of one operation.
    Pooled(PgPool),
}

/// Handle to the blog store.
///
/// Cheap to clone. Holds no connection between operations; each call to
/// [`Store::with_connection`] owns its connection exclusively.
#[derive(Clone)]
pub struct Store {
    source: ConnectionSource,
    observer: Arc<dyn StoreObserver>,
    timeout: Duration,
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("source", &self.source)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl Store {
    pub fn new(source: ConnectionSource) -> Self {
        Self {
            source,
            observer: Arc::new(NoopObserver),
            timeout: DEFAULT_OPERATION_TIMEOUT,
        }
    }

    /// Bound each operation, connect included, by `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Replace the default no-op observer.
    pub fn with_observer(mut self, observer: Arc<dyn StoreObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Run `f` against a connection scoped to this call.
    ///
    /// The connection is released before this returns, whether `f` succeeded
    /// or failed. A direct connection is closed explicitly; a pooled one goes
    /// back to the pool when its guard drops. If the returned future is
    /// dropped mid-flight, dropping the connection closes the socket.
    ///
    /// Connect and execution failures are returned unchanged. An operation
    /// that outlives the store timeout is abandoned, its connection dropped,
    /// and reported as an [`io::ErrorKind::TimedOut`] I/O error.
    pub async fn with_connection<T, F>(
        &self,
        operation: &'static str,
        f: F,
    ) -> Result<T, sqlx::Error>
    where
        F: for<'c> FnOnce(&'c mut PgConnection) -> BoxFuture<'c, Result<T, sqlx::Error>> + Send,
        T: Send,
    {
        let started = Instant::now();
        let result = match tokio::time::timeout(self.timeout, self.run_scoped(f)).await {
            Ok(result) => result,
            Err(_) => Err(timed_out(operation, self.timeout)),
        };
        self.observer.record(operation, started.elapsed(), result.is_ok());
        result
    }

    async fn run_scoped<T, F>(&self, f: F) -> Result<T, sqlx::Error>
    where
        F: for<'c> FnOnce(&'c mut PgConnection) -> BoxFuture<'c, Result<T, sqlx::Error>> + Send,
        T: Send,
    {
        match &self.source {
            ConnectionSource::Direct(options) => {
                let mut conn = PgConnection::connect_with(options).await?;
                let result = f(&mut conn).await;
                if let Err(err) = conn.close().await {
                    tracing::warn!(error = %err, "Failed to close store connection cleanly");
                }
                result
            }
            ConnectionSource::Pooled(pool) => {
                let mut conn = pool.acquire().await?;
                f(&mut *conn).await
            }
        }
    }
}

fn timed_out(operation: &'static str, after: Duration) -> sqlx::Error {
    sqlx::Error::Io(io::Error::new(
        io::ErrorKind::TimedOut,
        format!("store operation {operation} timed out after {}ms", after.as_millis()),
    ))
}
