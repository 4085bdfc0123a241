//! Round-robin connection pool
//!
//! A [`Pool`] keeps up to `pool_size` connection slots and hands out their
//! connections in rotation. Each slot replaces its connection on use once it
//! has expired, sat idle too long, or served its request budget.
//!
//! # Example
//!
//! ```ignore
//! use rpcpool::models::pool_options::PoolOptions;
//! use rpcpool::pool::Pool;
//! use rpcpool::transport::connector_fn;
//!
//! let pool = Pool::new(connector_fn(dial), PoolOptions::new().lazy_loading(true)).await?;
//! let conn = pool.get_conn().await?;
//! // use conn, never close it directly
//! pool.close().await?;
//! ```

mod pool;
mod shared;
mod slot;
mod stats;

#[cfg(test)]
mod mock;

pub use pool::Pool;
pub use stats::PoolStats;
