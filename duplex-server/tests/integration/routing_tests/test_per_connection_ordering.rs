use duplex_core::SignalingEnvelope;
use duplex_server::{Relay, RouteOutcome};

use crate::integration::{init_tracing, spawn_test_server};
use crate::utils::{TestClient, candidate_to, id};
use duplex_core::{ClientMessage, IceCandidate, ServerMessage};

#[test]
fn test_per_connection_ordering() {
    init_tracing();

    let relay = Relay::default();
    let _a = relay.connect_as(id("A1")).unwrap();
    let mut b = relay.connect_as(id("B1")).unwrap();

    let count = 50;
    for n in 0..count {
        assert_eq!(relay.route(candidate_to("B1", "A1", n)), RouteOutcome::Delivered);
    }

    for n in 0..count {
        let expected = candidate_to("B1", "A1", n);
        let got = b.inbox.try_recv().expect("Envelope missing");
        assert_eq!(got, expected, "Envelope {} out of order", n);
    }
    assert!(b.inbox.try_recv().is_err());
}

#[test]
fn test_envelope_is_delivered_verbatim() {
    init_tracing();

    let relay = Relay::default();
    let mut b = relay.connect_as(id("B1")).unwrap();

    let envelope = SignalingEnvelope::IceCandidate {
        candidate: IceCandidate {
            candidate: "not a real candidate".into(),
            sdp_mid: Some("0".into()),
            sdp_m_line_index: Some(0),
            username_fragment: None,
        },
        target: id("B1"),
        sender: id("nobody"),
    };

    relay.route(envelope.clone());
    assert_eq!(b.inbox.try_recv().unwrap(), envelope);
}

#[tokio::test]
async fn test_ws_ordering_preserved() {
    init_tracing();

    let server = spawn_test_server().await;
    let mut a = TestClient::connect(&server.url()).await.expect("connect A");
    let mut b = TestClient::connect(&server.url()).await.expect("connect B");

    let count = 20;
    for n in 0..count {
        a.send(&ClientMessage::IceCandidate {
            candidate: IceCandidate::new(format!("candidate:{n}")),
            target: b.id.clone(),
        })
        .await
        .expect("send");
    }

    for n in 0..count {
        match b.recv().await.expect("recv") {
            ServerMessage::IceCandidate { candidate, from } => {
                assert_eq!(candidate.candidate, format!("candidate:{n}"));
                assert_eq!(from, a.id);
            }
            other => panic!("Unexpected frame {:?}", other),
        }
    }
}
