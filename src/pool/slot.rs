use crate::error::PoolError;
use crate::models::pool_options::PoolOptions;
use crate::pool::shared::{Shared, close_quietly};
use crate::transport::Connection;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

/// Why a slot's connection had to be replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StaleReason {
    /// No connection held (never created, or the last dial failed).
    Missing,
    /// Older than `expire_timeout`.
    Expired,
    /// Unused for longer than `idle_timeout`.
    Idle,
    /// Already served `max_request_count` requests.
    Exhausted,
}

impl fmt::Display for StaleReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StaleReason::Missing => "missing",
            StaleReason::Expired => "expired",
            StaleReason::Idle => "idle",
            StaleReason::Exhausted => "exhausted",
        };
        f.write_str(s)
    }
}

struct SlotState<C> {
    handle: Option<Arc<C>>,
    created_at: Instant,
    last_used_at: Instant,
    requests_served: u64,
    detached: bool,
}

impl<C> SlotState<C> {
    /// Returns the held connection if it may serve another request at `now`.
    fn check(&self, now: Instant, options: &PoolOptions) -> Result<Arc<C>, StaleReason> {
        let Some(handle) = &self.handle else {
            return Err(StaleReason::Missing);
        };
        if passed(self.created_at, options.expire_timeout, now) {
            return Err(StaleReason::Expired);
        }
        if passed(self.last_used_at, options.idle_timeout, now) {
            return Err(StaleReason::Idle);
        }
        if self.requests_served >= options.max_request_count {
            return Err(StaleReason::Exhausted);
        }
        Ok(handle.clone())
    }
}

// a deadline too far out to represent never passes
fn passed(since: Instant, timeout: Duration, now: Instant) -> bool {
    since.checked_add(timeout).is_some_and(|deadline| deadline < now)
}

/// 连接槽：持有一条连接及其使用信息
/// Holds one connection plus its usage metadata, replacing the connection
/// lazily when it goes stale.
pub(crate) struct ConnectionSlot<C: Connection> {
    shared: Arc<Shared<C>>,
    state: Mutex<SlotState<C>>,
}

impl<C: Connection> ConnectionSlot<C> {
    pub(crate) fn new(shared: Arc<Shared<C>>, conn: C) -> Self {
        let now = Instant::now();
        Self {
            shared,
            state: Mutex::new(SlotState {
                handle: Some(Arc::new(conn)),
                created_at: now,
                last_used_at: now,
                requests_served: 0,
                detached: false,
            }),
        }
    }

    /// Validates the held connection, replacing it first if stale, and
    /// returns it. Callers landing on the same slot are serialised.
    pub(crate) async fn get_conn(&self) -> Result<Arc<C>, PoolError> {
        let mut state = self.state.lock().await;
        if state.detached {
            return Err(PoolError::PoolClosed);
        }

        let now = Instant::now();
        let handle = match state.check(now, &self.shared.options) {
            Ok(handle) => handle,
            Err(reason) => {
                if let Some(old) = state.handle.take() {
                    debug!(
                        "recycle connection: reason={}, requests_served={}, age_ms={}",
                        reason,
                        state.requests_served,
                        now.duration_since(state.created_at).as_millis()
                    );
                    self.shared.counters.record_recycled();
                    self.drain_later(old);
                }
                state.created_at = now;
                state.requests_served = 0;

                let handle = Arc::new(self.shared.dial().await?);
                state.handle = Some(handle.clone());
                handle
            }
        };

        state.requests_served += 1;
        state.last_used_at = now;
        Ok(handle)
    }

    /// Marks the slot unusable and hands back its connection for closing.
    pub(crate) async fn detach(&self) -> Option<Arc<C>> {
        let mut state = self.state.lock().await;
        state.detached = true;
        state.handle.take()
    }

    // In-flight callers may still hold `old`; give them the drain window.
    // TODO: close once the last outstanding Arc is dropped instead of after a fixed delay.
    fn drain_later(&self, old: Arc<C>) {
        let drain = self.shared.options.drain_window;
        tokio::spawn(async move {
            tokio::time::sleep(drain).await;
            close_quietly(old).await;
        });
    }
}
