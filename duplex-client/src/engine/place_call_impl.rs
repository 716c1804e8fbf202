use crate::engine::call_session::CallSession;
use crate::engine::{CallEngine, CallPhase, CallRole, discard_peer};
use crate::error::CallError;
use crate::peer::PeerConnection;
use duplex_core::{ConnectionId, SessionDescription};
use tracing::info;

impl CallEngine {
    pub(super) async fn place_call(&mut self, target: ConnectionId) -> Result<(), CallError> {
        self.ensure_phase("place_call", &[CallPhase::MediaAcquired])?;
        info!("Calling {}", target);

        let (generation, peer) = self.open_peer().await?;
        let offer = match create_local_offer(peer.as_ref()).await {
            Ok(offer) => offer,
            Err(e) => {
                discard_peer(peer).await;
                return Err(e);
            }
        };

        self.signaling
            .send_offer(target.clone(), self.local_id.clone(), offer)
            .await;

        self.pending_candidates.clear();
        let outbound_video = self.camera_track();
        self.session = Some(CallSession::new(
            CallRole::Caller,
            target,
            generation,
            peer,
            outbound_video,
        ));
        self.set_phase(CallPhase::Calling);
        Ok(())
    }
}

async fn create_local_offer(peer: &dyn PeerConnection) -> Result<SessionDescription, CallError> {
    let offer = peer.create_offer().await?;
    peer.set_local_description(offer.clone())
        .await
        .map_err(|e| CallError::NegotiationApply(e.to_string()))?;
    Ok(offer)
}
