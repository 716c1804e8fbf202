use duplex_client::{CallConfig, CallPhase};
use tokio::sync::mpsc;

use crate::integration::init_tracing;
use crate::utils::{Endpoint, call_answered, id, welcome};

#[tokio::test]
async fn test_transport_closed() {
    init_tracing();

    let (endpoint, _signaling) = Endpoint::isolated(CallConfig::default());

    let (inbound_tx, inbound_rx) = mpsc::unbounded_channel();
    let pump = endpoint.handle.attach(inbound_rx);
    inbound_tx.send(welcome("alice")).unwrap();

    call_answered(&endpoint, "bob").await;
    assert_eq!(
        endpoint.handle.snapshot().await.unwrap().local_id,
        Some(id("alice"))
    );

    // The relay connection goes away.
    drop(inbound_tx);
    pump.await.unwrap();

    let snapshot = endpoint.handle.snapshot().await.unwrap();
    assert_eq!(snapshot.phase, CallPhase::Idle);
    assert_eq!(snapshot.local_id, None);
    assert!(snapshot.local_tracks.is_empty());

    assert!(endpoint.peers.last().await.unwrap().is_closed().await);
    assert!(endpoint.media.all_stopped().await);
}

#[tokio::test]
async fn test_transport_closed_while_idle() {
    init_tracing();

    let (endpoint, _signaling) = Endpoint::isolated(CallConfig::default());
    endpoint.handle.deliver(welcome("alice")).unwrap();
    endpoint.handle.transport_closed().unwrap();

    let snapshot = endpoint.handle.snapshot().await.unwrap();
    assert_eq!(snapshot.phase, CallPhase::Idle);
    assert_eq!(snapshot.local_id, None);
}
