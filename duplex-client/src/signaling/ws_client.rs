use crate::signaling::SignalingOutput;
use anyhow::{Context, Result};
use async_trait::async_trait;
use duplex_core::{ClientMessage, ConnectionId, IceCandidate, ServerMessage, SessionDescription};
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, error, info, warn};

/// Websocket connection to a relay.
///
/// Outgoing messages are queued to a writer task; incoming frames come out of
/// the receiver returned by [`SignalingClient::connect`], which closes when
/// the socket does.
#[derive(Clone)]
pub struct SignalingClient {
    outbound: mpsc::UnboundedSender<ClientMessage>,
}

impl SignalingClient {
    pub async fn connect(url: &str) -> Result<(Self, mpsc::UnboundedReceiver<ServerMessage>)> {
        let (socket, _) = connect_async(url)
            .await
            .with_context(|| format!("Failed to connect to relay at {}", url))?;
        info!("Connected to relay at {}", url);

        let (mut sink, mut stream) = socket.split();
        let (outbound_tx, mut outbound_rx) = mpsc::unbounded_channel::<ClientMessage>();
        let (inbound_tx, inbound_rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            while let Some(msg) = outbound_rx.recv().await {
                let json = match serde_json::to_string(&msg) {
                    Ok(json) => json,
                    Err(e) => {
                        error!("Failed to serialize {:?}: {}", msg, e);
                        continue;
                    }
                };
                if sink.send(Message::Text(json.into())).await.is_err() {
                    break;
                }
            }
            let _ = sink.close().await;
        });

        tokio::spawn(async move {
            while let Some(Ok(frame)) = stream.next().await {
                match frame {
                    Message::Text(text) => {
                        match serde_json::from_str::<ServerMessage>(text.as_str()) {
                            Ok(msg) => {
                                debug!("Relay -> {:?}", msg);
                                if inbound_tx.send(msg).is_err() {
                                    break;
                                }
                            }
                            Err(e) => warn!("Invalid frame from relay: {}", e),
                        }
                    }
                    Message::Close(_) => break,
                    _ => {}
                }
            }
            info!("Relay connection closed");
        });

        Ok((
            Self {
                outbound: outbound_tx,
            },
            inbound_rx,
        ))
    }

    pub fn send(&self, msg: ClientMessage) {
        if self.outbound.send(msg).is_err() {
            warn!("Relay connection is closed, message dropped");
        }
    }
}

#[async_trait]
impl SignalingOutput for SignalingClient {
    async fn send_offer(
        &self,
        target: ConnectionId,
        caller: Option<ConnectionId>,
        offer: SessionDescription,
    ) {
        self.send(ClientMessage::CallUser {
            offer,
            target,
            caller,
        });
    }

    async fn send_answer(&self, target: ConnectionId, answer: SessionDescription) {
        self.send(ClientMessage::AnswerCall { answer, target });
    }

    async fn send_ice(&self, target: ConnectionId, candidate: IceCandidate) {
        self.send(ClientMessage::IceCandidate { candidate, target });
    }
}
