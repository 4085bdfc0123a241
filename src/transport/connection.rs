use crate::error::BoxError;
use async_trait::async_trait;

/// A live transport connection handed out by the pool.
///
/// The pool owns closing: callers receive a shared handle and must not close
/// it themselves.
#[async_trait]
pub trait Connection: Send + Sync + 'static {
    async fn close(&self) -> Result<(), BoxError>;
}

#[async_trait]
impl Connection for tokio::sync::Mutex<tokio::net::TcpStream> {
    async fn close(&self) -> Result<(), BoxError> {
        use tokio::io::AsyncWriteExt;
        self.lock().await.shutdown().await?;
        Ok(())
    }
}
