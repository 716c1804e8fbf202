use crate::engine::CallSnapshot;
use crate::error::CallError;
use duplex_core::{ConnectionId, ServerMessage};
use tokio::sync::oneshot;

pub(crate) type Reply<T> = oneshot::Sender<Result<T, CallError>>;

/// Everything that can drive the engine from outside, processed one at a time.
pub(crate) enum CallCommand {
    /// Local user actions.
    StartMedia(Reply<()>),
    EndMedia(Reply<()>),
    PlaceCall {
        target: ConnectionId,
        reply: Reply<()>,
    },
    AcceptCall(Reply<()>),
    DeclineCall(Reply<()>),
    ShareScreen(Reply<()>),
    StopShareScreen(Reply<()>),
    HangUp(Reply<()>),
    Snapshot(Reply<CallSnapshot>),

    /// A frame delivered by the relay.
    Signal(ServerMessage),

    /// The signaling connection is gone.
    TransportClosed,
}
