use crate::registry::{Connection, Relay};
use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::IntoResponse;
use duplex_core::{ClientMessage, ServerMessage};
use futures::{SinkExt, StreamExt};
use tracing::{debug, error, info, warn};

pub async fn ws_handler(ws: WebSocketUpgrade, State(relay): State<Relay>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, relay))
}

fn encode(msg: &ServerMessage) -> Option<Message> {
    match serde_json::to_string(msg) {
        Ok(json) => Some(Message::Text(json.into())),
        Err(e) => {
            error!("Failed to serialize server message: {}", e);
            None
        }
    }
}

async fn handle_socket(socket: WebSocket, relay: Relay) {
    let Connection { id, mut inbox } = match relay.connect() {
        Ok(connection) => connection,
        Err(e) => {
            error!("Refusing websocket connection: {}", e);
            return;
        }
    };
    info!("New WebSocket connection: {}", id);

    let (mut sender, mut receiver) = socket.split();

    let welcome = ServerMessage::Welcome {
        id: id.clone(),
        ice_servers: relay.ice_servers(),
    };
    if let Some(frame) = encode(&welcome) {
        if sender.send(frame).await.is_err() {
            relay.disconnect(&id);
            return;
        }
    }

    let mut send_task = tokio::spawn(async move {
        while let Some(envelope) = inbox.recv().await {
            let Some(frame) = encode(&envelope.into_server_message()) else {
                continue;
            };
            if sender.send(frame).await.is_err() {
                break;
            }
        }
    });

    let mut recv_task = tokio::spawn({
        let relay = relay.clone();
        let id = id.clone();

        async move {
            while let Some(Ok(msg)) = receiver.next().await {
                match msg {
                    Message::Text(text) => match serde_json::from_str::<ClientMessage>(&text) {
                        Ok(signal) => {
                            debug!("{} -> {}: {:?}", id, signal.target(), signal);
                            relay.route(signal.into_envelope(&id));
                        }
                        Err(e) => warn!("Invalid ClientMessage from {}: {}", id, e),
                    },
                    Message::Close(_) => break,
                    _ => {}
                }
            }
        }
    });

    tokio::select! {
        _ = (&mut send_task) => recv_task.abort(),
        _ = (&mut recv_task) => send_task.abort(),
    };

    relay.disconnect(&id);
    info!("WebSocket disconnected: {}", id);
}
