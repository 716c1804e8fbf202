use crate::engine::{CallEngine, CallEvent, CallPhase, EngineEvent};
use crate::error::CallError;
use crate::media::{MediaConstraints, MediaTrack, TrackKind, TrackSource};
use tracing::{debug, info, warn};

impl CallEngine {
    /// Swaps the outbound video for a display capture on the existing sender.
    /// No renegotiation takes place.
    pub(super) async fn share_screen(&mut self) -> Result<(), CallError> {
        self.ensure_phase("share_screen", &[CallPhase::Connected])?;

        let display = self.media.acquire_display().await?;
        let Some(session) = self.session.as_mut() else {
            display.stop();
            return Err(CallError::InvalidState {
                action: "share_screen",
                phase: self.phase,
            });
        };

        if let Err(e) = session.peer.replace_track(TrackKind::Video, &display).await {
            display.stop();
            return Err(CallError::NegotiationApply(e.to_string()));
        }
        info!("Sharing screen with {}", session.remote_id);
        session.outbound_video = Some(display.clone());
        session.screen = Some(display.clone());

        // The platform may end the capture on its own ("stop sharing" button).
        let generation = session.generation;
        let event_tx = self.event_tx.clone();
        tokio::spawn(async move {
            display.ended().await;
            let _ = event_tx.send(EngineEvent::DisplayEnded {
                generation,
                track_id: display.id().to_owned(),
            });
        });

        self.set_phase(CallPhase::ScreenSharing);
        Ok(())
    }

    pub(super) async fn stop_share_screen(&mut self) -> Result<(), CallError> {
        self.ensure_phase("stop_share_screen", &[CallPhase::ScreenSharing])?;
        self.restore_camera().await
    }

    pub(super) async fn handle_display_ended(&mut self, generation: u64, track_id: &str) {
        let current = self.phase == CallPhase::ScreenSharing
            && self.session.as_ref().is_some_and(|s| {
                s.generation == generation
                    && s.screen.as_ref().is_some_and(|t| t.id() == track_id)
            });
        if !current {
            debug!("Display track {} ended after sharing stopped", track_id);
            return;
        }

        info!("Display capture ended, restoring camera");
        if let Err(e) = self.restore_camera().await {
            warn!("Failed to restore camera: {}", e);
            self.notify(CallEvent::NegotiationFailed {
                reason: e.to_string(),
            });
        }
    }

    /// Stops the display capture and puts a camera track back on the video
    /// sender. The call stays up whether or not the camera comes back.
    async fn restore_camera(&mut self) -> Result<(), CallError> {
        if let Some(screen) = self.session.as_mut().and_then(|s| s.screen.take()) {
            screen.stop();
        }

        let outcome = match self.live_camera().await {
            Ok(camera) => match self.session.as_mut() {
                Some(session) => {
                    match session.peer.replace_track(TrackKind::Video, &camera).await {
                        Ok(()) => {
                            session.outbound_video = Some(camera);
                            Ok(())
                        }
                        Err(e) => Err(CallError::NegotiationApply(e.to_string())),
                    }
                }
                None => Ok(()),
            },
            Err(e) => Err(e),
        };

        if let Some(session) = self.session.as_mut() {
            if outcome.is_err() {
                session.outbound_video = None;
            }
            self.set_phase(CallPhase::Connected);
        }
        outcome
    }

    /// The original camera track when it is still live, else a fresh one.
    async fn live_camera(&mut self) -> Result<MediaTrack, CallError> {
        if let Some(camera) = self
            .local_tracks
            .iter()
            .find(|t| t.source() == TrackSource::Camera && t.is_live())
        {
            return Ok(camera.clone());
        }

        debug!("Camera track no longer live, re-acquiring");
        let fresh = self.media.acquire(MediaConstraints::VIDEO_ONLY).await?;
        let camera = fresh
            .into_iter()
            .find(|t| t.source() == TrackSource::Camera)
            .ok_or_else(|| {
                CallError::MediaAcquisition("capture returned no camera track".to_owned())
            })?;

        self.local_tracks.retain(|t| t.source() != TrackSource::Camera);
        self.local_tracks.push(camera.clone());
        Ok(camera)
    }
}
