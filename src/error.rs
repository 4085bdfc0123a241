use thiserror::Error;

/// Error type produced by transports (dial and close).
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Represents errors that can occur in the pool.
#[derive(Error, Debug)]
pub enum PoolError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Connection creation failed: {0}")]
    ConnectionCreationFailed(#[source] BoxError),
    #[error("Pool full")]
    PoolFull,
    #[error("Pool empty")]
    PoolEmpty,
    #[error("Pool closed")]
    PoolClosed,
}

impl PoolError {
    pub(crate) fn creation_failed(e: impl Into<BoxError>) -> Self {
        PoolError::ConnectionCreationFailed(e.into())
    }
}
