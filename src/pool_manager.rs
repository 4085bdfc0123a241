use std::sync::Arc;

use dashmap::DashMap;
use tracing::info;

use crate::error::PoolError;
use crate::models::pool_options::PoolOptions;
use crate::pool::Pool;
use crate::transport::{Connection, Connector};

/// 连接池管理器：按名称（通常是目标地址）注册连接池
/// Keeps one named pool per remote endpoint.
pub struct PoolManager<C: Connection> {
    pools: DashMap<String, Arc<Pool<C>>>,
}

impl<C: Connection> Default for PoolManager<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Connection> PoolManager<C> {
    pub fn new() -> Self {
        Self {
            pools: DashMap::new(),
        }
    }

    /// 注册连接池
    ///
    /// Builds a pool and stores it under `name`. A pool already registered
    /// under that name is closed and replaced.
    pub async fn register(
        &self,
        name: &str,
        connector: impl Connector<C> + 'static,
        options: PoolOptions,
    ) -> Result<Arc<Pool<C>>, PoolError> {
        let pool = Arc::new(Pool::new(connector, options).await?);
        if let Some(old) = self.pools.insert(name.to_string(), pool.clone()) {
            info!("replacing pool: name={}", name);
            old.close().await?;
        }
        Ok(pool)
    }

    /// 获取连接池
    pub fn get(&self, name: &str) -> Option<Arc<Pool<C>>> {
        self.pools.get(name).map(|v| v.value().clone())
    }

    /// Shortcut for `get(name)?.get_conn()`.
    pub async fn get_conn(&self, name: &str) -> Option<Result<Arc<C>, PoolError>> {
        let pool = self.get(name)?;
        Some(pool.get_conn().await)
    }

    pub fn names(&self) -> Vec<String> {
        self.pools.iter().map(|e| e.key().clone()).collect()
    }

    /// Unregisters a pool without closing it.
    pub fn remove(&self, name: &str) -> Option<Arc<Pool<C>>> {
        self.pools.remove(name).map(|(_, pool)| pool)
    }

    /// Closes and unregisters every pool.
    pub async fn close_all(&self) -> Result<(), PoolError> {
        for name in self.names() {
            if let Some(pool) = self.remove(&name) {
                pool.close().await?;
            }
        }
        Ok(())
    }
}
