use crate::media::{TrackInfo, TrackKind};
use crate::peer::PeerState;
use duplex_core::ConnectionId;
use std::fmt;

/// Where one endpoint is in its call lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallPhase {
    Idle,
    /// Local capture running, no call.
    MediaAcquired,
    /// Offer sent, waiting for the answer.
    Calling,
    /// Offer received, waiting for the local user.
    Ringing,
    Connected,
    /// Connected, with the outbound video replaced by a display capture.
    ScreenSharing,
    /// Momentary: a call has just ended.
    Disconnected,
}

impl CallPhase {
    pub fn in_call(self) -> bool {
        matches!(
            self,
            Self::Calling | Self::Ringing | Self::Connected | Self::ScreenSharing
        )
    }
}

impl fmt::Display for CallPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::MediaAcquired => "media acquired",
            Self::Calling => "calling",
            Self::Ringing => "ringing",
            Self::Connected => "connected",
            Self::ScreenSharing => "screen sharing",
            Self::Disconnected => "disconnected",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallRole {
    Caller,
    Callee,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteTrackInfo {
    pub id: String,
    pub kind: TrackKind,
}

/// Notifications for whatever presents the call to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum CallEvent {
    Registered { id: ConnectionId },
    PhaseChanged { from: CallPhase, to: CallPhase },
    IncomingCall { caller: ConnectionId },
    RemoteTrack(RemoteTrackInfo),
    PeerStateChanged(PeerState),
    NegotiationFailed { reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallSnapshot {
    pub phase: CallPhase,
    pub local_id: Option<ConnectionId>,
    pub role: Option<CallRole>,
    /// Remote party of the active call, or the caller while ringing.
    pub remote_id: Option<ConnectionId>,
    pub local_tracks: Vec<TrackInfo>,
    pub outbound_video: Option<TrackInfo>,
    pub remote_tracks: Vec<RemoteTrackInfo>,
    pub buffered_candidates: usize,
}
