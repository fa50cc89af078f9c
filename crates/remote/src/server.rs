// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! WebSocket server implementation.
//!
//! Each connection is served independently: every request frame is answered
//! with exactly one response frame carrying the same request id.

use std::net::SocketAddr;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, error, info, warn};

use seasync_core::protocol::{ClientMessage, ServerMessage};

use crate::error::{Result, ServerError};
use crate::state::ServerState;

/// Run the WebSocket server on the given address.
pub async fn run(addr: SocketAddr, state: ServerState) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("Listening on: {}", addr);
    accept_loop(listener, state).await
}

/// Accept connections forever, serving each on its own task.
pub(crate) async fn accept_loop(listener: TcpListener, state: ServerState) -> std::io::Result<()> {
    loop {
        let (stream, peer_addr) = listener.accept().await?;
        let state = state.clone();

        tokio::spawn(async move {
            if let Err(e) = handle_connection(stream, peer_addr, state).await {
                error!("Connection error from {}: {}", peer_addr, e);
            }
        });
    }
}

/// Handle a single WebSocket connection.
pub(crate) async fn handle_connection(
    stream: TcpStream,
    peer_addr: SocketAddr,
    state: ServerState,
) -> std::result::Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut ws = tokio_tungstenite::accept_async(stream).await?;
    info!("New WebSocket connection from: {}", peer_addr);

    while let Some(msg) = ws.next().await {
        match msg {
            Ok(Message::Text(text)) => {
                let response = handle_client_message(text.as_str(), &state).await;
                let json = response.to_json()?;
                ws.send(Message::Text(json.into())).await?;
            }
            Ok(Message::Close(_)) => {
                info!("Client {} disconnected", peer_addr);
                break;
            }
            Ok(Message::Ping(data)) => {
                ws.send(Message::Pong(data)).await?;
            }
            Ok(_) => {
                // Ignore other message types (Binary, Pong, Frame)
            }
            Err(e) => {
                warn!("WebSocket error from {}: {}", peer_addr, e);
                break;
            }
        }
    }

    debug!("Connection closed: {}", peer_addr);
    Ok(())
}

/// Process a client message and return the response to send back.
///
/// Failures are reported to the client as `error` messages.
pub(crate) async fn handle_client_message(text: &str, state: &ServerState) -> ServerMessage {
    let msg = match ClientMessage::from_json(text) {
        Ok(msg) => msg,
        Err(e) => {
            warn!("Malformed client message: {}", e);
            return ServerMessage::error(None, format!("malformed message: {}", e));
        }
    };

    let request_id = msg.request_id();
    match dispatch(msg, state).await {
        Ok(response) => response,
        Err(e) => {
            warn!("Request {:?} failed: {}", request_id, e);
            ServerMessage::error(request_id, e.to_string())
        }
    }
}

async fn dispatch(msg: ClientMessage, state: &ServerState) -> Result<ServerMessage> {
    match msg {
        ClientMessage::Insert {
            request_id,
            collection,
            document,
        } => {
            let id = state.insert(&collection, document).await?;
            debug!("Inserted {} into {}", id, collection);
            Ok(ServerMessage::inserted(request_id, id))
        }

        ClientMessage::List {
            request_id,
            collection,
            sort_field,
            descending,
        } => {
            let documents = state.list(&collection, &sort_field, descending).await?;
            debug!("Listing {} documents from {}", documents.len(), collection);
            Ok(ServerMessage::documents(request_id, documents))
        }

        ClientMessage::UploadBlob {
            request_id,
            path,
            data_base64,
        } => {
            let bytes = STANDARD
                .decode(data_base64.as_bytes())
                .map_err(|e| ServerError::Protocol(format!("invalid base64: {}", e)))?;
            let url = state.store_blob(&path, &bytes).await?;
            debug!("Stored {} bytes at {}", bytes.len(), path);
            Ok(ServerMessage::uploaded(request_id, url))
        }

        ClientMessage::Ping { id } => {
            debug!("Ping received: {}", id);
            Ok(ServerMessage::pong(id))
        }
    }
}
