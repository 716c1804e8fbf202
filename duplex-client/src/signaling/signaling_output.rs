use async_trait::async_trait;
use duplex_core::{ConnectionId, IceCandidate, SessionDescription};

/// Outbound half of the signaling channel, as seen by the call engine.
///
/// Sends are fire-and-forget: the relay never acknowledges delivery.
#[async_trait]
pub trait SignalingOutput: Send + Sync + 'static {
    /// `caller` is the local id when known; the relay fills in the sender
    /// otherwise.
    async fn send_offer(
        &self,
        target: ConnectionId,
        caller: Option<ConnectionId>,
        offer: SessionDescription,
    );

    async fn send_answer(&self, target: ConnectionId, answer: SessionDescription);

    async fn send_ice(&self, target: ConnectionId, candidate: IceCandidate);
}
