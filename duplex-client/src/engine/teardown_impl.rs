use crate::engine::{CallEngine, CallPhase, discard_peer};
use tracing::{info, warn};

impl CallEngine {
    /// Closes the peer connection, stops every local track and forgets all
    /// negotiation state. Safe to call in any phase.
    pub(super) async fn teardown(&mut self, reason: &str) {
        if self.phase == CallPhase::Idle && self.local_tracks.is_empty() {
            return;
        }
        let was_in_call = self.phase.in_call();

        self.pending_offer = None;
        self.pending_candidates.clear();

        if let Some(session) = self.session.take() {
            if let Some(screen) = &session.screen {
                screen.stop();
            }
            info!("Closing call with {}", session.remote_id);
            discard_peer(session.peer).await;
        }

        for track in self.local_tracks.drain(..) {
            track.stop();
        }

        if was_in_call {
            self.set_phase(CallPhase::Disconnected);
        }
        self.set_phase(CallPhase::Idle);
        info!("Call torn down ({})", reason);
    }

    pub(super) async fn handle_transport_closed(&mut self) {
        warn!("Signaling transport closed");
        self.teardown("transport closed").await;
        self.local_id = None;
    }
}
