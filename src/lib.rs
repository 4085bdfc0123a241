pub mod error;
pub mod models;
pub mod pool;
pub mod pool_manager;
pub mod transport;

pub use error::{BoxError, PoolError};
pub use models::pool_options::PoolOptions;
pub use pool::{Pool, PoolStats};
pub use pool_manager::PoolManager;
pub use transport::{Connection, Connector, connector_fn};
