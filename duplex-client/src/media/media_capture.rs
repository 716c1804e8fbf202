use crate::error::CallError;
use crate::media::MediaTrack;
use async_trait::async_trait;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MediaConstraints {
    pub audio: bool,
    pub video: bool,
}

impl MediaConstraints {
    pub const AUDIO_VIDEO: Self = Self {
        audio: true,
        video: true,
    };

    pub const VIDEO_ONLY: Self = Self {
        audio: false,
        video: true,
    };
}

/// Source of local capture tracks.
#[async_trait]
pub trait MediaCapture: Send + Sync + 'static {
    /// Fails with [`CallError::MediaAcquisition`] when a requested device is
    /// missing or access is denied.
    async fn acquire(&self, constraints: MediaConstraints) -> Result<Vec<MediaTrack>, CallError>;

    /// A single display-capture video track. The platform may end it at any
    /// time; callers watch [`MediaTrack::ended`].
    async fn acquire_display(&self) -> Result<MediaTrack, CallError>;
}
