use crate::error::CallError;
use crate::media::{MediaCapture, MediaConstraints, MediaTrack, TrackSource};
use async_trait::async_trait;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureDevices {
    pub microphone: bool,
    pub camera: bool,
    pub display: bool,
}

impl Default for CaptureDevices {
    fn default() -> Self {
        Self {
            microphone: true,
            camera: true,
            display: true,
        }
    }
}

/// Capture provider whose tracks are fed by the application, sample by
/// sample, through [`MediaTrack::sample_writer`].
#[derive(Debug, Clone)]
pub struct SampleCapture {
    devices: CaptureDevices,
    stream_id: String,
}

impl SampleCapture {
    pub fn new(stream_id: impl Into<String>) -> Self {
        Self::with_devices(stream_id, CaptureDevices::default())
    }

    pub fn with_devices(stream_id: impl Into<String>, devices: CaptureDevices) -> Self {
        Self {
            devices,
            stream_id: stream_id.into(),
        }
    }

    fn open(&self, source: TrackSource, available: bool) -> Result<MediaTrack, CallError> {
        if !available {
            warn!("Capture device unavailable: {:?}", source);
            return Err(CallError::MediaAcquisition(format!(
                "no {:?} device available",
                source
            )));
        }
        let track = MediaTrack::new(source, &self.stream_id);
        debug!("Opened {:?} track {}", source, track.id());
        Ok(track)
    }
}

#[async_trait]
impl MediaCapture for SampleCapture {
    async fn acquire(&self, constraints: MediaConstraints) -> Result<Vec<MediaTrack>, CallError> {
        let mut tracks = Vec::new();

        if constraints.audio {
            tracks.push(self.open(TrackSource::Microphone, self.devices.microphone)?);
        }
        if constraints.video {
            match self.open(TrackSource::Camera, self.devices.camera) {
                Ok(track) => tracks.push(track),
                Err(e) => {
                    // Nothing half-acquired may outlive a failed request.
                    tracks.iter().for_each(MediaTrack::stop);
                    return Err(e);
                }
            }
        }

        Ok(tracks)
    }

    async fn acquire_display(&self) -> Result<MediaTrack, CallError> {
        self.open(TrackSource::Display, self.devices.display)
    }
}
