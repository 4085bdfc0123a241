//! Connection pool implementation

use crate::error::PoolError;
use crate::models::pool_options::PoolOptions;
use crate::pool::shared::{Shared, close_quietly};
use crate::pool::slot::ConnectionSlot;
use crate::pool::stats::PoolStats;
use crate::transport::{Connection, Connector};
use parking_lot::RwLock;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tracing::{debug, info, warn};

/// 连接池
/// A bounded set of connection slots served in round-robin order.
///
/// Connections returned by [`Pool::get_conn`] are shared with the pool and
/// must not be closed by the caller.
pub struct Pool<C: Connection> {
    shared: Arc<Shared<C>>,
    slots: RwLock<Vec<Arc<ConnectionSlot<C>>>>,
    /// Serialises growth and close, both of which may await the connector.
    grow_lock: tokio::sync::Mutex<()>,
    cursor: AtomicU64,
    closed: AtomicBool,
}

impl<C: Connection> Pool<C> {
    /// Builds a pool. Unless `lazy_loading` is set, all `pool_size` slots are
    /// dialled before returning, and any dial failure fails the whole call.
    pub async fn new(
        connector: impl Connector<C> + 'static,
        options: PoolOptions,
    ) -> Result<Self, PoolError> {
        options.validate()?;

        let lazy = options.lazy_loading;
        let pool = Self {
            shared: Arc::new(Shared::new(Arc::new(connector), options)),
            slots: RwLock::new(Vec::new()),
            grow_lock: tokio::sync::Mutex::new(()),
            cursor: AtomicU64::new(0),
            closed: AtomicBool::new(false),
        };

        if !lazy {
            for _ in 0..pool.capacity() {
                if let Err(e) = pool.grow().await {
                    // nothing escapes a failed eager build
                    pool.close().await?;
                    return Err(e);
                }
            }
        }

        info!(
            "pool ready: capacity={}, size={}, lazy_loading={}",
            pool.capacity(),
            pool.size(),
            lazy
        );
        Ok(pool)
    }

    /// Returns a validated connection, growing the pool by one slot first if
    /// it is under capacity.
    pub async fn get_conn(&self) -> Result<Arc<C>, PoolError> {
        if self.is_closed() {
            return Err(PoolError::PoolClosed);
        }

        if self.size() < self.capacity() {
            match self.grow().await {
                Ok(_) | Err(PoolError::PoolFull) => {}
                Err(PoolError::ConnectionCreationFailed(e)) if self.size() > 0 => {
                    warn!("grow pool failed, serving from existing slots: error={}", e);
                }
                Err(e) => return Err(e),
            }
        }

        let slot = self.next_slot()?;
        slot.get_conn().await
    }

    /// Current number of slots.
    pub fn size(&self) -> usize {
        self.slots.read().len()
    }

    pub fn capacity(&self) -> usize {
        self.shared.options.pool_size
    }

    pub fn options(&self) -> &PoolOptions {
        &self.shared.options
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    pub fn stats(&self) -> PoolStats {
        self.shared
            .counters
            .snapshot(self.size(), self.capacity(), self.is_closed())
    }

    /// Detaches every slot and closes its connection. Close failures are
    /// logged, not returned. Calling this more than once is a no-op.
    pub async fn close(&self) -> Result<(), PoolError> {
        let _guard = self.grow_lock.lock().await;
        if self.closed.swap(true, Ordering::AcqRel) {
            return Ok(());
        }

        let slots = std::mem::take(&mut *self.slots.write());
        let count = slots.len();
        for slot in slots {
            if let Some(conn) = slot.detach().await {
                close_quietly(conn).await;
            }
        }
        info!("pool closed: slots={}", count);
        Ok(())
    }

    /// Appends one freshly dialled slot, unless the pool is already full.
    async fn grow(&self) -> Result<Arc<ConnectionSlot<C>>, PoolError> {
        let _guard = self.grow_lock.lock().await;
        if self.is_closed() {
            return Err(PoolError::PoolClosed);
        }
        if self.size() >= self.capacity() {
            return Err(PoolError::PoolFull);
        }

        let conn = self.shared.dial().await?;
        let slot = Arc::new(ConnectionSlot::new(self.shared.clone(), conn));
        let size = {
            let mut slots = self.slots.write();
            slots.push(slot.clone());
            slots.len()
        };
        debug!("slot added: size={}, capacity={}", size, self.capacity());
        Ok(slot)
    }

    fn next_slot(&self) -> Result<Arc<ConnectionSlot<C>>, PoolError> {
        let i = self.cursor.fetch_add(1, Ordering::Relaxed).wrapping_add(1);
        let slots = self.slots.read();
        let n = slots.len() as u64;
        if n == 0 {
            return Err(PoolError::PoolEmpty);
        }
        Ok(slots[(i % n) as usize].clone())
    }
}
