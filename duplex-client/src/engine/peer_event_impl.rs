use crate::engine::{CallEngine, CallEvent, EngineEvent, RemoteTrackInfo};
use crate::peer::PeerEvent;
use tracing::{debug, info};

impl CallEngine {
    pub(super) async fn handle_engine_event(&mut self, event: EngineEvent) {
        match event {
            EngineEvent::Peer { generation, event } => {
                self.handle_peer_event(generation, event).await
            }
            EngineEvent::DisplayEnded {
                generation,
                track_id,
            } => self.handle_display_ended(generation, &track_id).await,
        }
    }

    async fn handle_peer_event(&mut self, generation: u64, event: PeerEvent) {
        let Some(session) = self
            .session
            .as_mut()
            .filter(|s| s.generation == generation)
        else {
            debug!("Ignoring {:?} from a closed peer connection", event);
            return;
        };

        match event {
            PeerEvent::LocalCandidate(candidate) => {
                let target = session.remote_id.clone();
                self.signaling.send_ice(target, candidate).await;
            }

            PeerEvent::RemoteTrack { id, kind } => {
                info!("Remote {:?} track {} from {}", kind, id, session.remote_id);
                let track = RemoteTrackInfo { id, kind };
                session.remote_tracks.push(track.clone());
                self.notify(CallEvent::RemoteTrack(track));
            }

            PeerEvent::StateChanged(state) => {
                self.notify(CallEvent::PeerStateChanged(state));
            }
        }
    }
}
