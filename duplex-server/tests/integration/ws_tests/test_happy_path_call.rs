use duplex_core::{ClientMessage, IceCandidate, SdpKind, ServerMessage, SessionDescription};

use crate::integration::{init_tracing, spawn_test_server};
use crate::utils::TestClient;

#[tokio::test]
async fn test_happy_path_call() {
    init_tracing();

    let server = spawn_test_server().await;
    let mut a = TestClient::connect(&server.url()).await.expect("connect A");
    let mut b = TestClient::connect(&server.url()).await.expect("connect B");

    a.send(&ClientMessage::CallUser {
        offer: SessionDescription::offer("v=0 offer"),
        target: b.id.clone(),
        caller: Some(a.id.clone()),
    })
    .await
    .expect("call-user");

    match b.recv().await.expect("incoming-call") {
        ServerMessage::IncomingCall { offer, caller } => {
            assert_eq!(caller, a.id);
            assert_eq!(offer.kind, SdpKind::Offer);
            assert_eq!(offer.sdp, "v=0 offer");
        }
        other => panic!("Expected incoming-call, got {:?}", other),
    }

    b.send(&ClientMessage::AnswerCall {
        answer: SessionDescription::answer("v=0 answer"),
        target: a.id.clone(),
    })
    .await
    .expect("answer-call");

    match a.recv().await.expect("call-answered") {
        ServerMessage::CallAnswered { answer } => {
            assert_eq!(answer, SessionDescription::answer("v=0 answer"));
        }
        other => panic!("Expected call-answered, got {:?}", other),
    }

    b.send(&ClientMessage::IceCandidate {
        candidate: IceCandidate::new("candidate:1 1 udp 1 10.0.0.2 6000 typ host"),
        target: a.id.clone(),
    })
    .await
    .expect("ice-candidate");

    match a.recv().await.expect("ice-candidate") {
        ServerMessage::IceCandidate { from, .. } => assert_eq!(from, b.id),
        other => panic!("Expected ice-candidate, got {:?}", other),
    }

    // The relay never broadcasts.
    assert!(b.expect_silence().await);
}
