//! Mock transport used by the pool unit tests

use crate::error::BoxError;
use crate::models::pool_options::PoolOptions;
use crate::pool::shared::Shared;
use crate::transport::{Connection, Connector};
use async_trait::async_trait;
use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

#[derive(Debug)]
pub(crate) struct MockConnection {
    pub(crate) id: usize,
    closed: AtomicBool,
    closes: Arc<AtomicUsize>,
    fail_close: bool,
}

impl MockConnection {
    pub(crate) fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Connection for MockConnection {
    async fn close(&self) -> Result<(), BoxError> {
        self.closed.store(true, Ordering::SeqCst);
        self.closes.fetch_add(1, Ordering::SeqCst);
        if self.fail_close {
            return Err(io::Error::other("close failed").into());
        }
        Ok(())
    }
}

#[derive(Default)]
struct Inner {
    dials: AtomicUsize,
    fail_remaining: AtomicUsize,
    fail_at: AtomicUsize,
    fail_close: AtomicBool,
    closes: Arc<AtomicUsize>,
}

/// Counts dials and closes; can be told to fail the next `n` dials.
#[derive(Clone, Default)]
pub(crate) struct MockConnector {
    inner: Arc<Inner>,
}

impl MockConnector {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn fail_next(&self, n: usize) {
        self.inner.fail_remaining.store(n, Ordering::SeqCst);
    }

    /// Fails the `n`th dial (1-based) counted over the connector's lifetime.
    pub(crate) fn fail_at(&self, n: usize) {
        self.inner.fail_at.store(n, Ordering::SeqCst);
    }

    pub(crate) fn fail_close(&self) {
        self.inner.fail_close.store(true, Ordering::SeqCst);
    }

    pub(crate) fn dials(&self) -> usize {
        self.inner.dials.load(Ordering::SeqCst)
    }

    pub(crate) fn closes(&self) -> usize {
        self.inner.closes.load(Ordering::SeqCst)
    }

    /// Dials synchronously, bypassing failure injection.
    pub(crate) fn dial_now(&self) -> MockConnection {
        let id = self.inner.dials.fetch_add(1, Ordering::SeqCst);
        MockConnection {
            id,
            closed: AtomicBool::new(false),
            closes: self.inner.closes.clone(),
            fail_close: self.inner.fail_close.load(Ordering::SeqCst),
        }
    }
}

#[async_trait]
impl Connector<MockConnection> for MockConnector {
    async fn connect(&self) -> Result<MockConnection, BoxError> {
        let failing = self
            .inner
            .fail_remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
            || self.dials() + 1 == self.inner.fail_at.load(Ordering::SeqCst);
        if failing {
            self.inner.dials.fetch_add(1, Ordering::SeqCst);
            return Err(io::Error::new(io::ErrorKind::ConnectionRefused, "dial refused").into());
        }
        Ok(self.dial_now())
    }
}

pub(crate) fn shared(connector: &MockConnector, options: PoolOptions) -> Arc<Shared<MockConnection>> {
    Arc::new(Shared::new(Arc::new(connector.clone()), options))
}
