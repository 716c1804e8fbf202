use async_trait::async_trait;
use duplex_client::{
    CallError, CaptureDevices, MediaCapture, MediaConstraints, MediaTrack, SampleCapture,
};
use crate::utils::WAIT_MS;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

/// [`SampleCapture`] that remembers every track it hands out.
#[derive(Clone)]
pub struct MockMedia {
    capture: SampleCapture,
    issued: Arc<Mutex<Vec<MediaTrack>>>,
    displays: Arc<Mutex<Vec<MediaTrack>>>,
}

impl MockMedia {
    pub fn new() -> Self {
        Self::with_devices(CaptureDevices::default())
    }

    /// Camera access is refused.
    pub fn denied() -> Self {
        Self::with_devices(CaptureDevices {
            camera: false,
            ..Default::default()
        })
    }

    pub fn with_devices(devices: CaptureDevices) -> Self {
        Self {
            capture: SampleCapture::with_devices("test", devices),
            issued: Arc::new(Mutex::new(Vec::new())),
            displays: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub async fn issued(&self) -> Vec<MediaTrack> {
        self.issued.lock().await.clone()
    }

    pub async fn last_display(&self) -> Option<MediaTrack> {
        self.displays.lock().await.last().cloned()
    }

    /// True when every track ever handed out has been stopped.
    pub async fn all_stopped(&self) -> bool {
        let issued = self.issued.lock().await;
        let displays = self.displays.lock().await;
        issued.iter().chain(displays.iter()).all(|t| !t.is_live())
    }

    pub async fn wait_all_stopped(&self) -> bool {
        let start = std::time::Instant::now();
        let timeout = Duration::from_millis(WAIT_MS);

        loop {
            if self.all_stopped().await {
                return true;
            }
            if start.elapsed() > timeout {
                return false;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }
}

#[async_trait]
impl MediaCapture for MockMedia {
    async fn acquire(&self, constraints: MediaConstraints) -> Result<Vec<MediaTrack>, CallError> {
        let tracks = self.capture.acquire(constraints).await?;
        self.issued.lock().await.extend(tracks.iter().cloned());
        Ok(tracks)
    }

    async fn acquire_display(&self) -> Result<MediaTrack, CallError> {
        let track = self.capture.acquire_display().await?;
        self.displays.lock().await.push(track.clone());
        Ok(track)
    }
}
