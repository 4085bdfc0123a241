use crate::error::PoolError;
use crate::models::pool_options::PoolOptions;
use crate::pool::stats::PoolCounters;
use crate::transport::{Connection, Connector};
use std::sync::Arc;
use tracing::warn;

/// Immutable policy and connector view shared by the pool and all of its
/// slots. Slots hold this instead of a reference back to the pool.
pub(crate) struct Shared<C: Connection> {
    pub(crate) connector: Arc<dyn Connector<C>>,
    pub(crate) options: PoolOptions,
    pub(crate) counters: PoolCounters,
}

impl<C: Connection> Shared<C> {
    pub(crate) fn new(connector: Arc<dyn Connector<C>>, options: PoolOptions) -> Self {
        Self {
            connector,
            options,
            counters: PoolCounters::default(),
        }
    }

    /// Calls the connector once, recording the outcome.
    pub(crate) async fn dial(&self) -> Result<C, PoolError> {
        match self.connector.connect().await {
            Ok(conn) => {
                self.counters.record_created();
                Ok(conn)
            }
            Err(e) => {
                self.counters.record_failure();
                Err(PoolError::creation_failed(e))
            }
        }
    }
}

/// Closes a connection, logging instead of propagating failures.
pub(crate) async fn close_quietly<C: Connection>(conn: Arc<C>) {
    if let Err(e) = conn.close().await {
        warn!("close connection failed: error={}", e);
    }
}
