mod test_webrtc_peers_connect;

use std::net::SocketAddr;
use std::time::Duration;

use duplex_client::CallEvent;
use duplex_core::{ConnectionId, IceServerConfig};
use duplex_server::{Relay, serve_listener};
use tokio::net::TcpListener;
use tokio::sync::{mpsc, oneshot};

pub struct TestServer {
    pub addr: SocketAddr,
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

pub async fn spawn_test_server(ice_servers: Vec<IceServerConfig>) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("No local address");
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    tokio::spawn(async move {
        let _ = serve_listener(listener, Relay::new(ice_servers), async {
            let _ = shutdown_rx.await;
        })
        .await;
    });

    TestServer {
        addr,
        shutdown: Some(shutdown_tx),
    }
}

/// Next event matching `pred` within `timeout_ms`.
pub async fn next_event(
    events: &mut mpsc::UnboundedReceiver<CallEvent>,
    timeout_ms: u64,
    pred: impl Fn(&CallEvent) -> bool,
) -> Option<CallEvent> {
    let deadline = tokio::time::Instant::now() + Duration::from_millis(timeout_ms);
    loop {
        match tokio::time::timeout_at(deadline, events.recv()).await {
            Ok(Some(event)) if pred(&event) => return Some(event),
            Ok(Some(_)) => continue,
            _ => return None,
        }
    }
}

pub async fn registered_id(events: &mut mpsc::UnboundedReceiver<CallEvent>) -> ConnectionId {
    match next_event(events, 2000, |e| matches!(e, CallEvent::Registered { .. })).await {
        Some(CallEvent::Registered { id }) => id,
        other => panic!("Expected registration, got {:?}", other),
    }
}
