mod config;
mod engine;
mod error;
mod media;
mod peer;
mod signaling;

pub use config::*;
pub use engine::*;
pub use error::*;
pub use media::*;
pub use peer::*;
pub use signaling::*;
