//! WebSocket feed
//!
//! Every connected socket receives all queue events as JSON. Clients may
//! also join or leave the queue over the socket.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;

use crate::events::ClientMessage;
use crate::state::ServerState;

pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<Arc<ServerState>>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(mut socket: WebSocket, state: Arc<ServerState>) {
    let mut events = state.subscribe();
    tracing::info!("Observer connected");

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(event) => {
                    let text = match serde_json::to_string(&event) {
                        Ok(text) => text,
                        Err(e) => {
                            tracing::error!("Failed to encode event: {}", e);
                            continue;
                        }
                    };
                    if socket.send(Message::Text(text)).await.is_err() {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!("Observer lagged, {} events dropped", skipped);
                }
                Err(RecvError::Closed) => break,
            },
            incoming = socket.recv() => match incoming {
                Some(Ok(Message::Text(text))) => {
                    if text == "ping" {
                        if socket.send(Message::Pong(Vec::new())).await.is_err() {
                            break;
                        }
                        continue;
                    }
                    handle_client_text(&state, &text);
                }
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    tracing::warn!("WebSocket error: {}", e);
                    break;
                }
            },
        }
    }

    tracing::warn!("Observer disconnected");
}

/// Apply a join/leave request received over the socket
fn handle_client_text(state: &ServerState, text: &str) {
    match serde_json::from_str::<ClientMessage>(text) {
        Ok(ClientMessage::Join { team }) => {
            state.join(team);
        }
        Ok(ClientMessage::Leave { team }) => {
            state.leave(team);
        }
        Err(e) => {
            tracing::error!("Unrecognised socket message {:?}: {}", text, e);
        }
    }
}
