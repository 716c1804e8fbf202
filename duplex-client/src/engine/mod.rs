mod accept_call_impl;
mod call_command;
mod call_handle;
mod call_session;
mod call_state;
mod candidate_impl;
mod handle_signal_impl;
mod media_impl;
mod peer_event_impl;
mod place_call_impl;
mod screen_share_impl;
mod teardown_impl;

pub use call_handle::*;
pub use call_state::*;

use crate::config::CallConfig;
use crate::error::CallError;
use crate::media::{MediaCapture, MediaTrack, TrackSource};
use crate::peer::{PeerConnection, PeerConnectionFactory, PeerEvent};
use crate::signaling::{SignalingClient, SignalingOutput};
use call_command::CallCommand;
use call_session::{CallSession, PendingOffer};
use duplex_core::{ConnectionId, IceCandidate, IceServerConfig};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Events the engine produces for itself from spawned tasks.
pub(crate) enum EngineEvent {
    Peer { generation: u64, event: PeerEvent },
    DisplayEnded { generation: u64, track_id: String },
}

/// Call state machine of one endpoint.
///
/// Runs as a single task: user commands, relay frames and peer callbacks are
/// all funneled through channels and handled one at a time, so no transition
/// ever observes another one half-done.
pub struct CallEngine {
    config: CallConfig,
    media: Arc<dyn MediaCapture>,
    peers: Arc<dyn PeerConnectionFactory>,
    signaling: Arc<dyn SignalingOutput>,

    command_rx: mpsc::UnboundedReceiver<CallCommand>,
    event_rx: mpsc::UnboundedReceiver<EngineEvent>,
    event_tx: mpsc::UnboundedSender<EngineEvent>,
    notify_tx: mpsc::UnboundedSender<CallEvent>,

    phase: CallPhase,
    local_id: Option<ConnectionId>,
    ice_servers: Vec<IceServerConfig>,
    local_tracks: Vec<MediaTrack>,
    pending_offer: Option<PendingOffer>,
    /// Remote candidates that arrived before the remote description.
    pending_candidates: Vec<IceCandidate>,
    session: Option<CallSession>,
    generation: u64,
}

impl CallEngine {
    pub fn new(
        config: CallConfig,
        media: Arc<dyn MediaCapture>,
        peers: Arc<dyn PeerConnectionFactory>,
        signaling: Arc<dyn SignalingOutput>,
    ) -> (Self, CallHandle, mpsc::UnboundedReceiver<CallEvent>) {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (notify_tx, notify_rx) = mpsc::unbounded_channel();
        let ice_servers = config.ice_servers.clone();

        let engine = Self {
            config,
            media,
            peers,
            signaling,
            command_rx,
            event_rx,
            event_tx,
            notify_tx,
            phase: CallPhase::Idle,
            local_id: None,
            ice_servers,
            local_tracks: Vec::new(),
            pending_offer: None,
            pending_candidates: Vec::new(),
            session: None,
            generation: 0,
        };

        (engine, CallHandle::new(command_tx), notify_rx)
    }

    /// Creates the engine and runs it on the current tokio runtime.
    pub fn spawn(
        config: CallConfig,
        media: Arc<dyn MediaCapture>,
        peers: Arc<dyn PeerConnectionFactory>,
        signaling: Arc<dyn SignalingOutput>,
    ) -> (CallHandle, mpsc::UnboundedReceiver<CallEvent>) {
        let (engine, handle, events) = Self::new(config, media, peers, signaling);
        tokio::spawn(engine.run());
        (handle, events)
    }

    /// Connects to a relay at `url` and spawns an engine wired to it.
    pub async fn connect(
        url: &str,
        config: CallConfig,
        media: Arc<dyn MediaCapture>,
        peers: Arc<dyn PeerConnectionFactory>,
    ) -> anyhow::Result<(CallHandle, mpsc::UnboundedReceiver<CallEvent>)> {
        let (client, inbound) = SignalingClient::connect(url).await?;
        let (handle, events) = Self::spawn(config, media, peers, Arc::new(client));
        handle.attach(inbound);
        Ok((handle, events))
    }

    /// Main loop. Ends, tearing down any active call, once every
    /// [`CallHandle`] has been dropped.
    pub async fn run(mut self) {
        info!("Call engine started");

        loop {
            tokio::select! {
                cmd = self.command_rx.recv() => {
                    match cmd {
                        Some(c) => self.handle_command(c).await,
                        None => {
                            info!("All call handles dropped. Shutting down engine.");
                            break;
                        }
                    }
                }

                // `self.event_tx` keeps this channel open.
                Some(evt) = self.event_rx.recv() => {
                    self.handle_engine_event(evt).await;
                }
            }
        }

        self.teardown("engine shut down").await;
        info!("Call engine finished");
    }

    async fn handle_command(&mut self, cmd: CallCommand) {
        match cmd {
            CallCommand::StartMedia(reply) => {
                let _ = reply.send(self.start_media().await);
            }
            CallCommand::EndMedia(reply) => {
                let _ = reply.send(self.end_media().await);
            }
            CallCommand::PlaceCall { target, reply } => {
                let _ = reply.send(self.place_call(target).await);
            }
            CallCommand::AcceptCall(reply) => {
                let _ = reply.send(self.accept_call().await);
            }
            CallCommand::DeclineCall(reply) => {
                let _ = reply.send(self.decline_call());
            }
            CallCommand::ShareScreen(reply) => {
                let _ = reply.send(self.share_screen().await);
            }
            CallCommand::StopShareScreen(reply) => {
                let _ = reply.send(self.stop_share_screen().await);
            }
            CallCommand::HangUp(reply) => {
                self.teardown("hang up").await;
                let _ = reply.send(Ok(()));
            }
            CallCommand::Snapshot(reply) => {
                let _ = reply.send(Ok(self.snapshot()));
            }
            CallCommand::Signal(message) => self.handle_signal(message).await,
            CallCommand::TransportClosed => self.handle_transport_closed().await,
        }
    }

    fn snapshot(&self) -> CallSnapshot {
        let session = self.session.as_ref();

        CallSnapshot {
            phase: self.phase,
            local_id: self.local_id.clone(),
            role: session.map(|s| s.role),
            remote_id: session
                .map(|s| s.remote_id.clone())
                .or_else(|| self.pending_offer.as_ref().map(|p| p.caller.clone())),
            local_tracks: self.local_tracks.iter().map(MediaTrack::info).collect(),
            outbound_video: session
                .and_then(|s| s.outbound_video.as_ref())
                .map(MediaTrack::info),
            remote_tracks: session
                .map(|s| s.remote_tracks.clone())
                .unwrap_or_default(),
            buffered_candidates: self.pending_candidates.len(),
        }
    }

    fn set_phase(&mut self, to: CallPhase) {
        let from = self.phase;
        if from == to {
            return;
        }

        info!("Call phase: {} -> {}", from, to);
        self.phase = to;
        self.notify(CallEvent::PhaseChanged { from, to });
    }

    /// Where the engine settles when no call is in progress.
    fn resting_phase(&self) -> CallPhase {
        if self.local_tracks.is_empty() {
            CallPhase::Idle
        } else {
            CallPhase::MediaAcquired
        }
    }

    fn ensure_phase(&self, action: &'static str, allowed: &[CallPhase]) -> Result<(), CallError> {
        if allowed.contains(&self.phase) {
            Ok(())
        } else {
            Err(CallError::InvalidState {
                action,
                phase: self.phase,
            })
        }
    }

    fn notify(&self, event: CallEvent) {
        let _ = self.notify_tx.send(event);
    }

    fn camera_track(&self) -> Option<MediaTrack> {
        self.local_tracks
            .iter()
            .find(|t| t.source() == TrackSource::Camera)
            .cloned()
    }

    /// Creates a fresh peer connection carrying every local track. Its
    /// callbacks reach the engine tagged with a new generation.
    async fn open_peer(&mut self) -> Result<(u64, Box<dyn PeerConnection>), CallError> {
        self.generation += 1;
        let generation = self.generation;

        let (peer_tx, mut peer_rx) = mpsc::unbounded_channel();
        let peer = self.peers.create(&self.ice_servers, peer_tx).await?;

        let event_tx = self.event_tx.clone();
        tokio::spawn(async move {
            while let Some(event) = peer_rx.recv().await {
                if event_tx
                    .send(EngineEvent::Peer { generation, event })
                    .is_err()
                {
                    break;
                }
            }
        });

        for track in &self.local_tracks {
            if let Err(e) = peer.add_track(track).await {
                discard_peer(peer).await;
                return Err(e.into());
            }
        }

        Ok((generation, peer))
    }
}

async fn discard_peer(peer: Box<dyn PeerConnection>) {
    if let Err(e) = peer.close().await {
        warn!("Failed to close peer connection: {:?}", e);
    }
}
