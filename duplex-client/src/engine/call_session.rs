use crate::engine::{CallRole, RemoteTrackInfo};
use crate::media::MediaTrack;
use crate::peer::PeerConnection;
use duplex_core::{ConnectionId, SessionDescription};

/// An offer waiting for the local accept/decline decision.
pub(crate) struct PendingOffer {
    pub caller: ConnectionId,
    pub offer: SessionDescription,
}

/// The one active call of an endpoint.
pub(crate) struct CallSession {
    pub role: CallRole,
    pub remote_id: ConnectionId,
    /// Tags peer events so that callbacks of a closed connection are ignored.
    pub generation: u64,
    pub peer: Box<dyn PeerConnection>,
    /// Remote candidates can only be applied once this is set.
    pub remote_description_set: bool,
    pub outbound_video: Option<MediaTrack>,
    pub screen: Option<MediaTrack>,
    pub remote_tracks: Vec<RemoteTrackInfo>,
}

impl CallSession {
    pub fn new(
        role: CallRole,
        remote_id: ConnectionId,
        generation: u64,
        peer: Box<dyn PeerConnection>,
        outbound_video: Option<MediaTrack>,
    ) -> Self {
        Self {
            role,
            remote_id,
            generation,
            peer,
            remote_description_set: false,
            outbound_video,
            screen: None,
            remote_tracks: Vec::new(),
        }
    }
}
