use crate::engine::{CallEngine, CallPhase};
use crate::error::CallError;
use crate::media::MediaConstraints;
use tracing::info;

impl CallEngine {
    pub(super) async fn start_media(&mut self) -> Result<(), CallError> {
        self.ensure_phase("start_media", &[CallPhase::Idle])?;

        let tracks = self.media.acquire(MediaConstraints::AUDIO_VIDEO).await?;
        info!("Acquired {} local track(s)", tracks.len());
        self.local_tracks = tracks;

        let phase = self.resting_phase();
        self.set_phase(phase);
        Ok(())
    }

    pub(super) async fn end_media(&mut self) -> Result<(), CallError> {
        self.ensure_phase("end_media", &[CallPhase::MediaAcquired])?;

        for track in self.local_tracks.drain(..) {
            track.stop();
        }
        self.set_phase(CallPhase::Idle);
        Ok(())
    }
}
