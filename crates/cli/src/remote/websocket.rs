// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! WebSocket backend speaking the seasync-remote protocol.
//!
//! Requests are sent one at a time over a single connection that is opened
//! on demand. Any transport failure drops the connection so the next request
//! reconnects from scratch.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

use seasync_core::protocol::{ClientMessage, ServerMessage};

use super::backend::{RemoteBackend, RemoteError, RemoteFuture, RemoteResult};

type Connection = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Configuration for the WebSocket backend.
#[derive(Debug, Clone)]
pub struct WebSocketConfig {
    /// URL of the remote server.
    pub url: String,
    /// Maximum time to establish a connection.
    pub connect_timeout: Duration,
    /// Maximum time to wait for the response to one request.
    pub request_timeout: Duration,
}

impl Default for WebSocketConfig {
    fn default() -> Self {
        WebSocketConfig {
            url: "ws://localhost:7890".to_string(),
            connect_timeout: Duration::from_secs(2),
            request_timeout: Duration::from_secs(10),
        }
    }
}

/// Remote backend over a WebSocket connection.
pub struct WebSocketBackend {
    config: WebSocketConfig,
    /// The connection, if open. Held for the duration of one request.
    ws: Mutex<Option<Connection>>,
    next_request_id: AtomicU64,
}

impl WebSocketBackend {
    pub fn new(config: WebSocketConfig) -> Self {
        WebSocketBackend {
            config,
            ws: Mutex::new(None),
            next_request_id: AtomicU64::new(1),
        }
    }

    /// URL of the remote server.
    pub fn url(&self) -> &str {
        &self.config.url
    }

    fn next_request_id(&self) -> u64 {
        self.next_request_id.fetch_add(1, Ordering::Relaxed)
    }

    async fn connect(&self) -> RemoteResult<Connection> {
        let connect = tokio_tungstenite::connect_async(self.config.url.as_str());
        match tokio::time::timeout(self.config.connect_timeout, connect).await {
            Ok(Ok((ws, _))) => {
                tracing::debug!("Connected to {}", self.config.url);
                Ok(ws)
            }
            Ok(Err(e)) => Err(RemoteError::ConnectionFailed(e.to_string())),
            Err(_) => Err(RemoteError::Timeout(self.config.connect_timeout.as_secs())),
        }
    }

    /// Send one request and wait for the response carrying its request id.
    async fn request(&self, msg: ClientMessage) -> RemoteResult<ServerMessage> {
        let request_id = msg.request_id();
        let json = msg
            .to_json()
            .map_err(|e| RemoteError::SerializationError(e.to_string()))?;

        let mut guard = self.ws.lock().await;
        let mut ws = match guard.take() {
            Some(ws) => ws,
            None => self.connect().await?,
        };

        let exchange = async {
            ws.send(Message::Text(json.into()))
                .await
                .map_err(|e| RemoteError::SendFailed(e.to_string()))?;
            recv_response(&mut ws, request_id).await
        };

        let result = match tokio::time::timeout(self.config.request_timeout, exchange).await {
            Ok(result) => result,
            Err(_) => Err(RemoteError::Timeout(self.config.request_timeout.as_secs())),
        };

        match result {
            Ok(ServerMessage::Error { message, .. }) => {
                // The server answered; the connection is still usable.
                *guard = Some(ws);
                Err(RemoteError::Rejected(message))
            }
            Ok(response) => {
                *guard = Some(ws);
                Ok(response)
            }
            Err(e) => {
                // Connection state is unknown after a transport failure.
                tracing::debug!("Dropping connection to {}: {}", self.config.url, e);
                Err(e)
            }
        }
    }
}

/// Read frames until the response to `request_id` arrives.
async fn recv_response(ws: &mut Connection, request_id: Option<u64>) -> RemoteResult<ServerMessage> {
    loop {
        match ws.next().await {
            Some(Ok(Message::Text(text))) => {
                let msg = ServerMessage::from_json(text.as_str())
                    .map_err(|e| RemoteError::SerializationError(e.to_string()))?;
                if msg.request_id() == request_id {
                    return Ok(msg);
                }
                if let ServerMessage::Error {
                    request_id: None,
                    message,
                } = msg
                {
                    return Err(RemoteError::Rejected(message));
                }
                // Stale response from an abandoned request
                continue;
            }
            Some(Ok(Message::Close(_))) | None => return Err(RemoteError::ConnectionClosed),
            Some(Ok(_)) => continue,
            Some(Err(e)) => return Err(RemoteError::ReceiveFailed(e.to_string())),
        }
    }
}

fn unexpected(response: ServerMessage) -> RemoteError {
    RemoteError::SerializationError(format!("unexpected response: {:?}", response))
}

impl RemoteBackend for WebSocketBackend {
    fn insert<'a>(&'a self, collection: &'a str, document: Value) -> RemoteFuture<'a, String> {
        Box::pin(async move {
            let msg = ClientMessage::insert(self.next_request_id(), collection, document);
            match self.request(msg).await? {
                ServerMessage::Inserted { id, .. } => Ok(id),
                other => Err(unexpected(other)),
            }
        })
    }

    fn list_ordered<'a>(
        &'a self,
        collection: &'a str,
        sort_field: &'a str,
        descending: bool,
    ) -> RemoteFuture<'a, Vec<Value>> {
        Box::pin(async move {
            let msg =
                ClientMessage::list(self.next_request_id(), collection, sort_field, descending);
            match self.request(msg).await? {
                ServerMessage::Documents { documents, .. } => Ok(documents),
                other => Err(unexpected(other)),
            }
        })
    }

    fn upload_blob<'a>(&'a self, path: &'a str, bytes: Vec<u8>) -> RemoteFuture<'a, String> {
        Box::pin(async move {
            let msg =
                ClientMessage::upload_blob(self.next_request_id(), path, STANDARD.encode(bytes));
            match self.request(msg).await? {
                ServerMessage::Uploaded { url, .. } => Ok(url),
                other => Err(unexpected(other)),
            }
        })
    }
}
