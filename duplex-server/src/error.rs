use duplex_core::ConnectionId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RelayError {
    /// A freshly allocated id matched a live registry entry.
    #[error("connection id {0} is already registered")]
    IdCollision(ConnectionId),
}
