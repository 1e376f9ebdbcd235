//! Side-channel hook invoked after every store operation.
//!
//! Observers see the operation name, how long it took and whether it
//! succeeded. They cannot change the result.

use std::time::Duration;

pub trait StoreObserver: Send + Sync {
    fn record(&self, operation: &'static str, elapsed: Duration, succeeded: bool);
}

/// Default observer. Does nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl StoreObserver for NoopObserver {
    fn record(&self, _operation: &'static str, _elapsed: Duration, _succeeded: bool) {}
}

/// Emits one structured `tracing` event per store operation.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl StoreObserver for TracingObserver {
    fn record(&self, operation: &'static str, elapsed: Duration, succeeded: bool) {
        let elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        if succeeded {
            tracing::debug!(operation, elapsed_ms, "Store operation completed");
        } else {
            tracing::warn!(operation, elapsed_ms, "Store operation failed");
        }
    }
}
