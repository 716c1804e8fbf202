mod connection;
mod ice;
mod session;
mod signaling;

pub use connection::{ConnectionId, InvalidConnectionId};
pub use ice::{DEFAULT_STUN_ADDR, IceCandidate, IceServerConfig};
pub use session::{SdpKind, SessionDescription};
pub use signaling::{ClientMessage, ServerMessage, SignalingEnvelope};
