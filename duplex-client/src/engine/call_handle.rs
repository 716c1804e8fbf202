use crate::engine::CallSnapshot;
use crate::engine::call_command::{CallCommand, Reply};
use crate::error::CallError;
use duplex_core::{ConnectionId, ServerMessage};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::debug;

/// Cheap, cloneable front of a running [`CallEngine`](crate::CallEngine).
#[derive(Clone)]
pub struct CallHandle {
    command_tx: mpsc::UnboundedSender<CallCommand>,
}

impl CallHandle {
    pub(crate) fn new(command_tx: mpsc::UnboundedSender<CallCommand>) -> Self {
        Self { command_tx }
    }

    async fn request<T>(
        &self,
        command: impl FnOnce(Reply<T>) -> CallCommand,
    ) -> Result<T, CallError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.command_tx
            .send(command(reply_tx))
            .map_err(|_| CallError::EngineClosed)?;
        reply_rx.await.map_err(|_| CallError::EngineClosed)?
    }

    /// Acquires microphone and camera.
    pub async fn start_media(&self) -> Result<(), CallError> {
        self.request(CallCommand::StartMedia).await
    }

    pub async fn end_media(&self) -> Result<(), CallError> {
        self.request(CallCommand::EndMedia).await
    }

    /// Sends an offer to `target`. The id is validated before anything else
    /// happens.
    pub async fn place_call(&self, target: &str) -> Result<(), CallError> {
        let target = ConnectionId::parse(target)?;
        self.request(|reply| CallCommand::PlaceCall { target, reply })
            .await
    }

    pub async fn accept_call(&self) -> Result<(), CallError> {
        self.request(CallCommand::AcceptCall).await
    }

    pub async fn decline_call(&self) -> Result<(), CallError> {
        self.request(CallCommand::DeclineCall).await
    }

    pub async fn share_screen(&self) -> Result<(), CallError> {
        self.request(CallCommand::ShareScreen).await
    }

    pub async fn stop_share_screen(&self) -> Result<(), CallError> {
        self.request(CallCommand::StopShareScreen).await
    }

    /// Ends whatever is in progress. Valid in every phase.
    pub async fn hang_up(&self) -> Result<(), CallError> {
        self.request(CallCommand::HangUp).await
    }

    pub async fn snapshot(&self) -> Result<CallSnapshot, CallError> {
        self.request(CallCommand::Snapshot).await
    }

    /// Feeds one relay frame to the engine.
    pub fn deliver(&self, message: ServerMessage) -> Result<(), CallError> {
        self.command_tx
            .send(CallCommand::Signal(message))
            .map_err(|_| CallError::EngineClosed)
    }

    pub fn transport_closed(&self) -> Result<(), CallError> {
        self.command_tx
            .send(CallCommand::TransportClosed)
            .map_err(|_| CallError::EngineClosed)
    }

    /// Pumps relay frames into the engine until the stream ends, then reports
    /// the transport as closed. Holds only a weak reference, so the engine
    /// still shuts down when the last real handle is dropped.
    pub fn attach(&self, mut inbound: mpsc::UnboundedReceiver<ServerMessage>) -> JoinHandle<()> {
        let command_tx = self.command_tx.downgrade();
        tokio::spawn(async move {
            while let Some(message) = inbound.recv().await {
                let delivered = command_tx
                    .upgrade()
                    .is_some_and(|tx| tx.send(CallCommand::Signal(message)).is_ok());
                if !delivered {
                    debug!("Engine stopped, no longer reading signaling frames");
                    return;
                }
            }
            if let Some(tx) = command_tx.upgrade() {
                let _ = tx.send(CallCommand::TransportClosed);
            }
        })
    }
}
