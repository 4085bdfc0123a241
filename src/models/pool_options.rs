use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::PoolError;

pub const DEFAULT_POOL_SIZE: usize = 10;
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(5 * 60);
pub const DEFAULT_EXPIRE_TIMEOUT: Duration = Duration::from_secs(60 * 60);
pub const DEFAULT_MAX_REQUEST_COUNT: u64 = 1 << 17;
pub const DEFAULT_DRAIN_WINDOW: Duration = Duration::from_secs(60);

/// 连接池配置
/// Pool policy, fixed once the pool is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolOptions {
    pub pool_size: usize, // 池中最多的连接槽数量
    pub idle_timeout: Duration, // 连接最长空闲时间
    pub expire_timeout: Duration, // 连接最长生命周期
    pub max_request_count: u64, // 单个连接最多服务的请求数
    pub lazy_loading: bool, // 按需创建连接
    pub drain_window: Duration, // 被替换的连接延迟关闭的时间
}

impl Default for PoolOptions {
    fn default() -> Self {
        PoolOptions {
            pool_size: DEFAULT_POOL_SIZE,
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
            expire_timeout: DEFAULT_EXPIRE_TIMEOUT,
            max_request_count: DEFAULT_MAX_REQUEST_COUNT,
            lazy_loading: false,
            drain_window: DEFAULT_DRAIN_WINDOW,
        }
    }
}

impl PoolOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pool_size(mut self, pool_size: usize) -> Self {
        self.pool_size = pool_size;
        self
    }

    pub fn idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }

    pub fn expire_timeout(mut self, expire_timeout: Duration) -> Self {
        self.expire_timeout = expire_timeout;
        self
    }

    pub fn max_request_count(mut self, max_request_count: u64) -> Self {
        self.max_request_count = max_request_count;
        self
    }

    pub fn lazy_loading(mut self, lazy_loading: bool) -> Self {
        self.lazy_loading = lazy_loading;
        self
    }

    /// How long a superseded connection stays open so in-flight calls can finish.
    pub fn drain_window(mut self, drain_window: Duration) -> Self {
        self.drain_window = drain_window;
        self
    }

    pub fn validate(&self) -> Result<(), PoolError> {
        if self.pool_size == 0 {
            return Err(PoolError::InvalidConfiguration(
                "pool_size must be greater than 0".into(),
            ));
        }
        if self.max_request_count == 0 {
            return Err(PoolError::InvalidConfiguration(
                "max_request_count must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}
