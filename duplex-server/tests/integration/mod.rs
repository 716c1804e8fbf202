
use std::net::SocketAddr;

use duplex_core::IceServerConfig;
use duplex_server::{Relay, serve_listener};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tracing::Level;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_test_writer()
        .try_init();
}

pub struct TestServer {
    pub addr: SocketAddr,
    pub relay: Relay,
    shutdown: Option<oneshot::Sender<()>>,
}

impl TestServer {
    pub fn url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

pub async fn spawn_test_server() -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("No local address");

    let relay = Relay::new(vec![IceServerConfig::stun("stun:stun.example.test:3478")]);
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    tokio::spawn({
        let relay = relay.clone();
        async move {
            let _ = serve_listener(listener, relay, async {
                let _ = shutdown_rx.await;
            })
            .await;
        }
    });

    TestServer {
        addr,
        relay,
        shutdown: Some(shutdown_tx),
    }
}
