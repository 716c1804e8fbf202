mod media_capture;
mod media_track;
mod sample_capture;

pub use media_capture::*;
pub use media_track::*;
pub use sample_capture::*;
