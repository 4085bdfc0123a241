use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use rpcpool::{BoxError, Connection, Connector, PoolManager, PoolOptions};

struct Endpoint {
    addr: &'static str,
    closed: AtomicBool,
}

#[async_trait]
impl Connection for Endpoint {
    async fn close(&self) -> Result<(), BoxError> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}

struct Dialer {
    addr: &'static str,
    dials: AtomicUsize,
}

impl Dialer {
    fn new(addr: &'static str) -> Arc<Self> {
        Arc::new(Self {
            addr,
            dials: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl Connector<Endpoint> for Dialer {
    async fn connect(&self) -> Result<Endpoint, BoxError> {
        if self.addr.is_empty() {
            return Err(io::Error::new(io::ErrorKind::InvalidInput, "empty address").into());
        }
        self.dials.fetch_add(1, Ordering::SeqCst);
        Ok(Endpoint {
            addr: self.addr,
            closed: AtomicBool::new(false),
        })
    }
}

#[tokio::test]
async fn test_register_and_lookup_by_name() {
    let manager = PoolManager::new();
    manager
        .register("users", Dialer::new("10.0.0.1:50051"), PoolOptions::new().pool_size(2))
        .await
        .unwrap();
    manager
        .register(
            "orders",
            Dialer::new("10.0.0.2:50051"),
            PoolOptions::new().lazy_loading(true),
        )
        .await
        .unwrap();

    let conn = manager.get_conn("users").await.unwrap().unwrap();
    assert_eq!(conn.addr, "10.0.0.1:50051");
    let conn = manager.get_conn("orders").await.unwrap().unwrap();
    assert_eq!(conn.addr, "10.0.0.2:50051");
    assert!(manager.get_conn("missing").await.is_none());

    let mut names = manager.names();
    names.sort();
    assert_eq!(names, vec!["orders".to_string(), "users".to_string()]);
}

#[tokio::test]
async fn test_register_replaces_and_closes_previous_pool() {
    let manager = PoolManager::new();
    let old = manager
        .register("svc", Dialer::new("old:1"), PoolOptions::new().pool_size(1))
        .await
        .unwrap();
    let old_conn = old.get_conn().await.unwrap();

    manager
        .register("svc", Dialer::new("new:1"), PoolOptions::new().pool_size(1))
        .await
        .unwrap();

    assert!(old.is_closed());
    assert!(old_conn.closed.load(Ordering::SeqCst));
    let conn = manager.get_conn("svc").await.unwrap().unwrap();
    assert_eq!(conn.addr, "new:1");
}

#[tokio::test]
async fn test_failed_register_keeps_nothing() {
    let manager: PoolManager<Endpoint> = PoolManager::new();
    let result = manager
        .register("bad", Dialer::new(""), PoolOptions::new())
        .await;
    assert!(result.is_err());
    assert!(manager.get("bad").is_none());
}

#[tokio::test]
async fn test_shared_dialer_and_close_all() {
    let dialer = Dialer::new("10.0.0.3:50051");
    let manager = PoolManager::new();
    let a = manager
        .register("a", dialer.clone(), PoolOptions::new().pool_size(2))
        .await
        .unwrap();
    let b = manager
        .register("b", dialer.clone(), PoolOptions::new().pool_size(3))
        .await
        .unwrap();
    assert_eq!(dialer.dials.load(Ordering::SeqCst), 5);

    let removed = manager.remove("a").unwrap();
    assert!(!removed.is_closed());
    assert!(manager.get("a").is_none());

    manager.close_all().await.unwrap();
    assert!(manager.names().is_empty());
    assert!(b.is_closed());
    assert!(!a.is_closed());
    a.close().await.unwrap();
    assert_eq!(a.size(), 0);
}
