use duplex_client::{CallError, CallPhase, TrackSource};
use duplex_server::Relay;

use crate::integration::init_tracing;
use crate::utils::{PeerCall, connected_pair};

#[tokio::test]
async fn test_screen_share_round_trip() {
    init_tracing();

    let relay = Relay::default();
    let ((alice, _), (bob, _)) = connected_pair(&relay).await;

    let before = bob.handle.snapshot().await.unwrap();
    let camera = before.outbound_video.clone().expect("No outbound video");
    assert_eq!(camera.source, TrackSource::Camera);

    bob.handle.share_screen().await.expect("share_screen failed");

    let sharing = bob.handle.snapshot().await.unwrap();
    assert_eq!(sharing.phase, CallPhase::ScreenSharing);
    let display = sharing.outbound_video.expect("No outbound video");
    assert_eq!(display.source, TrackSource::Display);

    let bob_peer = bob.peers.last().await.unwrap();
    assert_eq!(bob_peer.replaced_video().await, vec![display.id.clone()]);

    // Only one at a time.
    let err = bob.handle.share_screen().await.unwrap_err();
    assert!(matches!(err, CallError::InvalidState { .. }));

    bob.handle.stop_share_screen().await.expect("stop_share_screen failed");

    let after = bob.handle.snapshot().await.unwrap();
    assert_eq!(after.phase, CallPhase::Connected);
    let restored = after.outbound_video.expect("No outbound video");
    assert_eq!(restored.id, camera.id);
    assert!(restored.live);
    assert!(!bob.media.last_display().await.unwrap().is_live());
    assert_eq!(
        bob_peer.replaced_video().await,
        vec![display.id.clone(), camera.id.clone()]
    );

    // Switching sources never renegotiates.
    let alice_peer = alice.peers.last().await.unwrap();
    let count = |calls: &[PeerCall], call: PeerCall| calls.iter().filter(|c| **c == call).count();
    assert_eq!(count(&alice_peer.calls().await, PeerCall::CreateOffer), 1);
    assert_eq!(count(&bob_peer.calls().await, PeerCall::CreateAnswer), 1);
    assert_eq!(alice.peers.created().await, 1);
    assert_eq!(bob.peers.created().await, 1);

    let err = bob.handle.stop_share_screen().await.unwrap_err();
    assert!(matches!(
        err,
        CallError::InvalidState {
            action: "stop_share_screen",
            phase: CallPhase::Connected
        }
    ));
}
