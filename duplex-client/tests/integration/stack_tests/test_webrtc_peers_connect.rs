use std::sync::Arc;

use duplex_client::{
    CallConfig, CallEngine, CallEvent, PeerState, SampleCapture, WebRtcPeerFactory,
};

use super::{next_event, registered_id, spawn_test_server};
use crate::integration::init_tracing;

/// Host candidates only; no STUN round trips.
fn local_config() -> CallConfig {
    CallConfig {
        ice_servers: Vec::new(),
        ..Default::default()
    }
}

fn peer_connected(e: &CallEvent) -> bool {
    *e == CallEvent::PeerStateChanged(PeerState::Connected)
}

#[tokio::test]
async fn test_webrtc_peers_connect() {
    init_tracing();

    let server = spawn_test_server(Vec::new()).await;

    let (alice, mut alice_events) = CallEngine::connect(
        &server.url(),
        local_config(),
        Arc::new(SampleCapture::new("alice")),
        Arc::new(WebRtcPeerFactory),
    )
    .await
    .expect("Alice failed to connect");

    let (bob, mut bob_events) = CallEngine::connect(
        &server.url(),
        local_config(),
        Arc::new(SampleCapture::new("bob")),
        Arc::new(WebRtcPeerFactory),
    )
    .await
    .expect("Bob failed to connect");

    let _alice_id = registered_id(&mut alice_events).await;
    let bob_id = registered_id(&mut bob_events).await;

    alice.start_media().await.unwrap();
    alice.place_call(bob_id.as_str()).await.unwrap();

    next_event(&mut bob_events, 5000, |e| {
        matches!(e, CallEvent::IncomingCall { .. })
    })
    .await
    .expect("Bob never rang");
    bob.accept_call().await.unwrap();

    assert!(
        next_event(&mut alice_events, 10000, peer_connected)
            .await
            .is_some(),
        "Alice's peer connection never connected"
    );
    assert!(
        next_event(&mut bob_events, 10000, peer_connected)
            .await
            .is_some(),
        "Bob's peer connection never connected"
    );

    // Swapping in a display track works on a live webrtc sender.
    bob.share_screen().await.unwrap();
    bob.stop_share_screen().await.unwrap();

    alice.hang_up().await.unwrap();
    bob.hang_up().await.unwrap();
}
