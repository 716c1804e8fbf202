use crate::engine::call_session::PendingOffer;
use crate::engine::{CallEngine, CallEvent, CallPhase};
use duplex_core::{ConnectionId, IceServerConfig, ServerMessage, SessionDescription};
use tracing::{info, warn};

impl CallEngine {
    pub(super) async fn handle_signal(&mut self, message: ServerMessage) {
        match message {
            ServerMessage::Welcome { id, ice_servers } => self.on_welcome(id, ice_servers),
            ServerMessage::IncomingCall { offer, caller } => self.on_incoming_call(caller, offer),
            ServerMessage::CallAnswered { answer } => self.on_call_answered(answer).await,
            ServerMessage::IceCandidate { candidate, from } => {
                self.handle_remote_candidate(from, candidate).await
            }
        }
    }

    fn on_welcome(&mut self, id: ConnectionId, ice_servers: Vec<IceServerConfig>) {
        info!("Registered with relay as {}", id);
        if !ice_servers.is_empty() {
            self.ice_servers = ice_servers;
        }
        self.local_id = Some(id.clone());
        self.notify(CallEvent::Registered { id });
    }

    fn on_incoming_call(&mut self, caller: ConnectionId, offer: SessionDescription) {
        if !matches!(self.phase, CallPhase::Idle | CallPhase::MediaAcquired) {
            info!("Busy ({}), ignoring call from {}", self.phase, caller);
            return;
        }

        info!("Incoming call from {}", caller);
        self.pending_candidates.clear();
        self.pending_offer = Some(PendingOffer {
            caller: caller.clone(),
            offer,
        });
        self.set_phase(CallPhase::Ringing);
        self.notify(CallEvent::IncomingCall { caller });
    }

    async fn on_call_answered(&mut self, answer: SessionDescription) {
        if self.phase != CallPhase::Calling {
            info!("Ignoring answer while {}", self.phase);
            return;
        }
        let Some(session) = self.session.as_mut() else {
            return;
        };

        if let Err(e) = session.peer.set_remote_description(answer).await {
            warn!("Rejected answer from {}: {:?}", session.remote_id, e);
            self.notify(CallEvent::NegotiationFailed {
                reason: e.to_string(),
            });
            return;
        }
        session.remote_description_set = true;
        info!("Call answered by {}", session.remote_id);

        self.flush_candidates().await;
        self.set_phase(CallPhase::Connected);
    }
}
