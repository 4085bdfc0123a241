use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use rpcpool::{Pool, PoolOptions, connector_fn};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Mutex;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

/// 本地 echo 服务，模拟远端 RPC 服务
async fn serve_echo(listener: TcpListener) {
    loop {
        let Ok((mut socket, _)) = listener.accept().await else {
            return;
        };
        tokio::spawn(async move {
            let mut buf = [0u8; 1024];
            loop {
                match socket.read(&mut buf).await {
                    Ok(0) | Err(_) => return,
                    Ok(n) => {
                        if socket.write_all(&buf[..n]).await.is_err() {
                            return;
                        }
                    }
                }
            }
        });
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt().with_env_filter(EnvFilter::new("debug")).init();

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr: SocketAddr = listener.local_addr()?;
    tokio::spawn(serve_echo(listener));

    let options = PoolOptions::new()
        .pool_size(3)
        .lazy_loading(true)
        .max_request_count(20)
        .drain_window(Duration::from_secs(1));
    let pool = Arc::new(
        Pool::new(
            connector_fn(move || async move { TcpStream::connect(addr).await.map(Mutex::new) }),
            options,
        )
        .await?,
    );

    let mut tasks = Vec::new();
    for worker in 0..4 {
        let pool = pool.clone();
        tasks.push(tokio::spawn(async move {
            for i in 0..25 {
                let conn = pool.get_conn().await?;
                let mut stream = conn.lock().await;
                let msg = format!("worker={} seq={}", worker, i);
                stream.write_all(msg.as_bytes()).await?;
                let mut buf = vec![0u8; msg.len()];
                stream.read_exact(&mut buf).await?;
            }
            anyhow::Ok(())
        }));
    }
    for task in tasks {
        task.await??;
    }

    info!("stats: {:?}", pool.stats());
    tokio::time::sleep(Duration::from_secs(2)).await; // 等待被替换的连接关闭
    pool.close().await?;
    Ok(())
}
