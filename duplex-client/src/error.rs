use crate::engine::CallPhase;
use duplex_core::InvalidConnectionId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CallError {
    /// Capture denied or no such device. The call is not started.
    #[error("media acquisition failed: {0}")]
    MediaAcquisition(String),

    #[error("invalid call target: {0}")]
    InvalidTarget(#[from] InvalidConnectionId),

    #[error("`{action}` is not allowed while {phase}")]
    InvalidState {
        action: &'static str,
        phase: CallPhase,
    },

    /// A description or track change was rejected by the peer connection.
    #[error("negotiation step rejected: {0}")]
    NegotiationApply(String),

    #[error(transparent)]
    Peer(#[from] anyhow::Error),

    #[error("call engine is no longer running")]
    EngineClosed,
}
