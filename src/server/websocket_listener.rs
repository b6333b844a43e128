use crate::protocol::ServerMessage;
use crate::server::{ConnectionHandler, GatewayState};
use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};
use tracing::{debug, error, info};

pub async fn handle_websocket(
    ws: WebSocketUpgrade,
    State(state): State<GatewayState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| listen(socket, state))
}

async fn listen(socket: WebSocket, state: GatewayState) {
    let (ws_sender, ws_receiver) = socket.split();
    let (tx, rx) = unbounded_channel();
    let mut connection_handler =
        ConnectionHandler::new(state.registry.clone(), tx, state.turn_timeout);
    let client_id = connection_handler.client_id();
    info!(%client_id, "Client connected");

    let sender_task = handle_outgoing_messages(rx, ws_sender);
    let receiver_task = handle_incoming_messages(ws_receiver, &mut connection_handler);

    tokio::select! {
        _ = sender_task => {
            info!(%client_id, "Sender task completed");
        }
        _ = receiver_task => {
            info!(%client_id, "Receiver task completed");
        }
    }
    connection_handler.disconnect().await;
}

pub async fn handle_outgoing_messages(
    mut rx: UnboundedReceiver<ServerMessage>,
    mut ws_sender: SplitSink<WebSocket, Message>,
) {
    while let Some(message) = rx.recv().await {
        let text = match serde_json::to_string(&message) {
            Ok(text) => text,
            Err(e) => {
                error!(error = %e, kind = message.kind(), "Failed to serialize message");
                continue;
            }
        };
        if let Err(e) = ws_sender.send(Message::Text(text)).await {
            debug!(error = %e, "Failed to send message");
            break;
        }
    }
}

pub async fn handle_incoming_messages(
    mut receiver: SplitStream<WebSocket>,
    connection_handler: &mut ConnectionHandler,
) {
    while let Some(message) = receiver.next().await {
        match message {
            Ok(Message::Text(text)) => connection_handler.handle_text(&text).await,
            Ok(Message::Binary(bytes)) => connection_handler.handle_binary(&bytes).await,
            Ok(Message::Close(_)) => {
                info!(client_id = %connection_handler.client_id(), "Client disconnected");
                break;
            }
            Ok(_) => {}
            Err(e) => {
                debug!(error = %e, "Failed to receive message");
                break;
            }
        }
    }
}
