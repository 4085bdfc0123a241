//! Pool statistics types

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Snapshot of a pool's state, taken by [`Pool::stats`](super::Pool::stats).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PoolStats {
    /// Number of slots currently in the pool
    pub size: usize,
    /// Maximum number of slots
    pub capacity: usize,
    /// Successful connector calls, including replacements
    pub connections_created: u64,
    /// Connections retired because they went stale
    pub connections_recycled: u64,
    /// Failed connector calls
    pub creation_failures: u64,
    /// Whether the pool has been closed
    pub closed: bool,
}

impl PoolStats {
    /// Whether every slot has been created.
    pub fn is_full(&self) -> bool {
        self.size >= self.capacity
    }
}

#[derive(Debug, Default)]
pub(crate) struct PoolCounters {
    created: AtomicU64,
    recycled: AtomicU64,
    failures: AtomicU64,
}

impl PoolCounters {
    pub(crate) fn record_created(&self) {
        self.created.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_recycled(&self) {
        self.recycled.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_failure(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self, size: usize, capacity: usize, closed: bool) -> PoolStats {
        PoolStats {
            size,
            capacity,
            connections_created: self.created.load(Ordering::Relaxed),
            connections_recycled: self.recycled.load(Ordering::Relaxed),
            creation_failures: self.failures.load(Ordering::Relaxed),
            closed,
        }
    }
}
