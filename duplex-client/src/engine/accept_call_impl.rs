use crate::engine::call_session::CallSession;
use crate::engine::{CallEngine, CallEvent, CallPhase, CallRole, discard_peer};
use crate::error::CallError;
use crate::media::MediaConstraints;
use duplex_core::SessionDescription;
use tracing::{info, warn};

impl CallEngine {
    pub(super) async fn accept_call(&mut self) -> Result<(), CallError> {
        self.ensure_phase("accept_call", &[CallPhase::Ringing])?;

        // Capture failure leaves the offer pending; the user may retry or decline.
        if self.local_tracks.is_empty() {
            self.local_tracks = self.media.acquire(MediaConstraints::AUDIO_VIDEO).await?;
        }

        let Some(pending) = self.pending_offer.take() else {
            return Err(CallError::InvalidState {
                action: "accept_call",
                phase: self.phase,
            });
        };
        info!("Accepting call from {}", pending.caller);

        let (generation, peer) = match self.open_peer().await {
            Ok(opened) => opened,
            Err(e) => {
                self.pending_offer = Some(pending);
                return Err(e);
            }
        };

        if let Err(e) = peer.set_remote_description(pending.offer).await {
            warn!("Rejected offer from {}: {:?}", pending.caller, e);
            discard_peer(peer).await;
            self.pending_candidates.clear();
            self.fail_negotiation(e.to_string());
            return Err(CallError::NegotiationApply(e.to_string()));
        }

        let outbound_video = self.camera_track();
        let mut session = CallSession::new(
            CallRole::Callee,
            pending.caller.clone(),
            generation,
            peer,
            outbound_video,
        );
        session.remote_description_set = true;
        self.session = Some(session);
        self.flush_candidates().await;

        let answer = match self.create_local_answer().await {
            Ok(answer) => answer,
            Err(e) => {
                warn!("Failed to answer {}: {}", pending.caller, e);
                if let Some(session) = self.session.take() {
                    discard_peer(session.peer).await;
                }
                self.fail_negotiation(e.to_string());
                return Err(e);
            }
        };

        self.signaling.send_answer(pending.caller, answer).await;
        self.set_phase(CallPhase::Connected);
        Ok(())
    }

    pub(super) fn decline_call(&mut self) -> Result<(), CallError> {
        self.ensure_phase("decline_call", &[CallPhase::Ringing])?;

        if let Some(pending) = self.pending_offer.take() {
            info!("Declined call from {}", pending.caller);
        }
        self.pending_candidates.clear();

        let phase = self.resting_phase();
        self.set_phase(phase);
        Ok(())
    }

    async fn create_local_answer(&self) -> Result<SessionDescription, CallError> {
        let Some(session) = self.session.as_ref() else {
            return Err(CallError::InvalidState {
                action: "accept_call",
                phase: self.phase,
            });
        };

        let answer = session.peer.create_answer().await?;
        session
            .peer
            .set_local_description(answer.clone())
            .await
            .map_err(|e| CallError::NegotiationApply(e.to_string()))?;
        Ok(answer)
    }

    /// Drops back to the resting phase after a call could not be set up.
    fn fail_negotiation(&mut self, reason: String) {
        let phase = self.resting_phase();
        self.set_phase(phase);
        self.notify(CallEvent::NegotiationFailed { reason });
    }
}
