use crate::config::CandidatePolicy;
use crate::engine::CallEngine;
use crate::engine::call_session::CallSession;
use duplex_core::{ConnectionId, IceCandidate};
use tracing::{debug, warn};

impl CallEngine {
    /// Remote candidates are only taken from the party of the current call
    /// (or of the pending offer).
    pub(super) async fn handle_remote_candidate(
        &mut self,
        from: ConnectionId,
        candidate: IceCandidate,
    ) {
        let expected = match (&self.session, &self.pending_offer) {
            (Some(session), _) => &session.remote_id,
            (None, Some(pending)) => &pending.caller,
            (None, None) => {
                debug!("ICE candidate from {} with no call, discarded", from);
                return;
            }
        };
        if *expected != from {
            warn!(
                "ICE candidate from {} does not belong to the call with {}, discarded",
                from, expected
            );
            return;
        }

        let ready = self
            .session
            .as_ref()
            .is_some_and(|s| s.remote_description_set);

        match (self.config.candidate_policy, &self.session) {
            (CandidatePolicy::Buffer, _) if !ready => {
                if self.pending_candidates.len() >= self.config.max_buffered_candidates {
                    warn!(
                        "Candidate buffer full ({}), ICE candidate from {} discarded",
                        self.pending_candidates.len(),
                        from
                    );
                    return;
                }
                debug!("Buffering early ICE candidate from {}", from);
                self.pending_candidates.push(candidate);
            }
            (_, Some(session)) => apply_candidate(session, candidate).await,
            (_, None) => {
                warn!("No peer connection yet, ICE candidate from {} discarded", from);
            }
        }
    }

    /// Applies every buffered candidate, in arrival order.
    pub(super) async fn flush_candidates(&mut self) {
        let Some(session) = &self.session else {
            return;
        };

        let buffered = std::mem::take(&mut self.pending_candidates);
        if !buffered.is_empty() {
            debug!(
                "Applying {} buffered ICE candidate(s) from {}",
                buffered.len(),
                session.remote_id
            );
        }
        for candidate in buffered {
            apply_candidate(session, candidate).await;
        }
    }
}

async fn apply_candidate(session: &CallSession, candidate: IceCandidate) {
    if let Err(e) = session.peer.add_ice_candidate(candidate).await {
        warn!(
            "Failed to add ICE candidate from {}: {:?}",
            session.remote_id, e
        );
    }
}
