use crate::error::BoxError;
use crate::transport::connection::Connection;
use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;

/// 连接工厂：每次调用拨号一条新连接
/// Dials a new transport connection. Any deadline on the dial is the
/// connector's own business; the pool never times it out.
#[async_trait]
pub trait Connector<C: Connection>: Send + Sync {
    async fn connect(&self) -> Result<C, BoxError>;
}

#[async_trait]
impl<C: Connection, T: Connector<C> + ?Sized> Connector<C> for Arc<T> {
    async fn connect(&self) -> Result<C, BoxError> {
        (**self).connect().await
    }
}

/// Adapter returned by [`connector_fn`].
pub struct FnConnector<F> {
    f: F,
}

/// Wraps an async closure as a [`Connector`].
///
/// ```ignore
/// let connector = connector_fn(|| async { TcpStream::connect("127.0.0.1:50051").await });
/// ```
pub fn connector_fn<F>(f: F) -> FnConnector<F> {
    FnConnector { f }
}

#[async_trait]
impl<C, E, F, Fut> Connector<C> for FnConnector<F>
where
    C: Connection,
    E: Into<BoxError> + 'static,
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<C, E>> + Send + 'static,
{
    async fn connect(&self) -> Result<C, BoxError> {
        (self.f)().await.map_err(Into::into)
    }
}
