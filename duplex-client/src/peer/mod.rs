mod webrtc_peer;

pub use webrtc_peer::*;

use crate::media::{MediaTrack, TrackKind};
use anyhow::Result;
use async_trait::async_trait;
use duplex_core::{IceCandidate, IceServerConfig, SessionDescription};
use tokio::sync::mpsc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeerState {
    New,
    Connecting,
    Connected,
    Disconnected,
    Failed,
    Closed,
}

/// Asynchronous callbacks of a peer connection, delivered as messages.
#[derive(Debug, Clone, PartialEq)]
pub enum PeerEvent {
    /// Produced after the local description is set, one per candidate.
    LocalCandidate(IceCandidate),
    RemoteTrack { id: String, kind: TrackKind },
    StateChanged(PeerState),
}

pub type PeerEventSender = mpsc::UnboundedSender<PeerEvent>;

/// The peer-to-peer session primitive a call drives.
#[async_trait]
pub trait PeerConnection: Send + Sync {
    async fn create_offer(&self) -> Result<SessionDescription>;

    async fn create_answer(&self) -> Result<SessionDescription>;

    async fn set_local_description(&self, desc: SessionDescription) -> Result<()>;

    async fn set_remote_description(&self, desc: SessionDescription) -> Result<()>;

    async fn add_track(&self, track: &MediaTrack) -> Result<()>;

    /// Swaps the outbound track of `kind` on its existing sender. Must not
    /// trigger renegotiation.
    async fn replace_track(&self, kind: TrackKind, track: &MediaTrack) -> Result<()>;

    async fn add_ice_candidate(&self, candidate: IceCandidate) -> Result<()>;

    async fn close(&self) -> Result<()>;
}

#[async_trait]
pub trait PeerConnectionFactory: Send + Sync + 'static {
    async fn create(
        &self,
        ice_servers: &[IceServerConfig],
        events: PeerEventSender,
    ) -> Result<Box<dyn PeerConnection>>;
}
