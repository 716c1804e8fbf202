use duplex_client::{CallConfig, CallError, CallPhase, CallRole, TrackSource};
use duplex_core::SdpKind;

use crate::integration::init_tracing;
use crate::utils::{Endpoint, PeerCall, SignalMessage, id, welcome};

#[tokio::test]
async fn test_place_call_gating() {
    init_tracing();

    let (endpoint, signaling) = Endpoint::isolated(CallConfig::default());
    endpoint.handle.deliver(welcome("alice")).unwrap();

    // No media yet.
    let err = endpoint.handle.place_call("bob").await.unwrap_err();
    assert!(matches!(
        err,
        CallError::InvalidState {
            action: "place_call",
            phase: CallPhase::Idle
        }
    ));
    assert_eq!(endpoint.peers.created().await, 0);

    endpoint.handle.start_media().await.unwrap();
    endpoint.handle.place_call("bob").await.expect("place_call failed");

    let snapshot = endpoint.handle.snapshot().await.unwrap();
    assert_eq!(snapshot.phase, CallPhase::Calling);
    assert_eq!(snapshot.role, Some(CallRole::Caller));
    assert_eq!(snapshot.remote_id, Some(id("bob")));
    assert_eq!(snapshot.local_id, Some(id("alice")));

    let signals = signaling.signals().await;
    assert_eq!(signals.len(), 1);
    let SignalMessage::Offer {
        target,
        caller,
        offer,
    } = &signals[0]
    else {
        panic!("Expected an offer, got {:?}", signals[0]);
    };
    assert_eq!(target, &id("bob"));
    assert_eq!(caller, &Some(id("alice")));
    assert_eq!(offer.kind, SdpKind::Offer);

    let peer = endpoint.peers.last().await.unwrap();
    assert_eq!(
        peer.calls().await,
        vec![
            PeerCall::AddTrack(TrackSource::Microphone),
            PeerCall::AddTrack(TrackSource::Camera),
            PeerCall::CreateOffer,
            PeerCall::SetLocal(SdpKind::Offer),
        ]
    );

    // One call at a time: a second offer is refused outright.
    let err = endpoint.handle.place_call("carol").await.unwrap_err();
    assert!(matches!(
        err,
        CallError::InvalidState {
            action: "place_call",
            phase: CallPhase::Calling
        }
    ));
    assert_eq!(signaling.offers().await, 1);
    assert_eq!(endpoint.peers.created().await, 1);
}
