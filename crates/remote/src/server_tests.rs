// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Test server utilities for integration testing.
//!
//! Provides a TestServer that runs on a random port against a temporary
//! data directory.

#![cfg(test)]
#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::net::SocketAddr;
use std::path::Path;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use crate::server;
use crate::state::ServerState;

const PUBLIC_URL: &str = "http://blobs.test";

/// A test server that runs on a random port and can be controlled.
pub struct TestServer {
    addr: SocketAddr,
    shutdown_tx: oneshot::Sender<()>,
    state: ServerState,
    /// Keep the temp directory alive for the lifetime of the test server.
    temp_dir: tempfile::TempDir,
}

impl TestServer {
    /// Start a new test server on a random available port.
    pub async fn start() -> Self {
        let temp_dir = tempfile::tempdir().unwrap();
        let state = ServerState::new(temp_dir.path(), PUBLIC_URL).unwrap();

        // Bind to port 0 to get a random available port
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        let state_clone = state.clone();
        tokio::spawn(async move {
            tokio::select! {
                result = server::accept_loop(listener, state_clone) => {
                    if let Err(e) = result {
                        eprintln!("Test server error: {}", e);
                    }
                }
                _ = shutdown_rx => {}
            }
        });

        TestServer {
            addr,
            shutdown_tx,
            state,
            temp_dir,
        }
    }

    /// Get the WebSocket URL for connecting to this server.
    pub fn ws_url(&self) -> String {
        format!("ws://{}", self.addr)
    }

    /// Get access to the server state for verification.
    pub fn state(&self) -> &ServerState {
        &self.state
    }

    /// Data directory of the server.
    pub fn data_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Shutdown the test server.
    pub fn shutdown(self) {
        let _ = self.shutdown_tx.send(());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::{SinkExt, StreamExt};
    use serde_json::json;
    use tokio::time::{timeout, Duration};
    use tokio_tungstenite::connect_async;
    use tokio_tungstenite::tungstenite::Message;

    use seasync_core::protocol::{ClientMessage, ServerMessage};

    type Client = tokio_tungstenite::WebSocketStream<
        tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>,
    >;

    async fn connect(server: &TestServer) -> Client {
        let (ws, _) = connect_async(server.ws_url()).await.unwrap();
        ws
    }

    /// Send raw text and wait for the next text response.
    async fn send_text(ws: &mut Client, text: String) -> ServerMessage {
        ws.send(Message::Text(text.into())).await.unwrap();
        match timeout(Duration::from_secs(5), ws.next()).await {
            Ok(Some(Ok(Message::Text(text)))) => ServerMessage::from_json(text.as_str()).unwrap(),
            Ok(other) => panic!("Expected text response, got {:?}", other),
            Err(_) => panic!("Timeout waiting for response"),
        }
    }

    async fn request(ws: &mut Client, msg: ClientMessage) -> ServerMessage {
        send_text(ws, msg.to_json().unwrap()).await
    }

    #[tokio::test]
    async fn test_ping_pong() {
        let server = TestServer::start().await;
        let mut ws = connect(&server).await;

        let response = request(&mut ws, ClientMessage::ping(42)).await;
        assert!(matches!(response, ServerMessage::Pong { id: 42 }));

        server.shutdown();
    }

    #[tokio::test]
    async fn test_insert_then_list() {
        let server = TestServer::start().await;
        let mut ws = connect(&server).await;

        let older = json!({"type": "plastic", "description": "older", "timestamp": 100});
        let newer = json!({"type": "sewage", "description": "newer", "timestamp": 200});

        let first = request(&mut ws, ClientMessage::insert(1, "pollution_reports", older)).await;
        let ServerMessage::Inserted { request_id, id } = first else {
            panic!("Expected Inserted, got {:?}", first);
        };
        assert_eq!(request_id, 1);
        assert!(id.starts_with("pollution-"));

        request(&mut ws, ClientMessage::insert(2, "pollution_reports", newer)).await;

        let response = request(
            &mut ws,
            ClientMessage::list(3, "pollution_reports", "timestamp", true),
        )
        .await;
        let ServerMessage::Documents {
            request_id,
            documents,
        } = response
        else {
            panic!("Expected Documents, got {:?}", response);
        };
        assert_eq!(request_id, 3);
        assert_eq!(documents.len(), 2);
        assert_eq!(documents[0]["description"], "newer");
        assert_eq!(documents[1]["id"], id.as_str());

        server.shutdown();
    }

    #[tokio::test]
    async fn test_upload_blob() {
        let server = TestServer::start().await;
        let mut ws = connect(&server).await;

        let msg = ClientMessage::upload_blob(7, "reports/pollution_1-0.jpg", "aGVsbG8=".into());
        let response = request(&mut ws, msg).await;

        assert_eq!(
            response,
            ServerMessage::uploaded(7, "http://blobs.test/blobs/reports/pollution_1-0.jpg")
        );
        let stored = std::fs::read(server.data_dir().join("blobs/reports/pollution_1-0.jpg"))
            .unwrap();
        assert_eq!(stored, b"hello");

        server.shutdown();
    }

    #[tokio::test]
    async fn test_rejected_upload_keeps_request_id() {
        let server = TestServer::start().await;
        let mut ws = connect(&server).await;

        let escape = ClientMessage::upload_blob(8, "../escape.jpg", "aGVsbG8=".into());
        match request(&mut ws, escape).await {
            ServerMessage::Error {
                request_id,
                message,
            } => {
                assert_eq!(request_id, Some(8));
                assert!(message.contains("invalid blob path"));
            }
            other => panic!("Expected Error, got {:?}", other),
        }

        let bad_data = ClientMessage::upload_blob(9, "reports/x.jpg", "!!!".into());
        let response = request(&mut ws, bad_data).await;
        assert!(matches!(
            response,
            ServerMessage::Error {
                request_id: Some(9),
                ..
            }
        ));

        // The connection stays usable
        let response = request(&mut ws, ClientMessage::ping(1)).await;
        assert!(matches!(response, ServerMessage::Pong { id: 1 }));

        server.shutdown();
    }

    #[tokio::test]
    async fn test_insert_non_object_is_rejected() {
        let server = TestServer::start().await;
        let mut ws = connect(&server).await;

        let response = request(&mut ws, ClientMessage::insert(4, "c", json!("text"))).await;

        assert!(matches!(
            response,
            ServerMessage::Error {
                request_id: Some(4),
                ..
            }
        ));
        assert_eq!(server.state().count("c").await.unwrap(), 0);

        server.shutdown();
    }

    #[tokio::test]
    async fn test_malformed_json_returns_error() {
        let server = TestServer::start().await;
        let mut ws = connect(&server).await;

        let response = send_text(&mut ws, "not valid json".to_string()).await;

        assert!(matches!(
            response,
            ServerMessage::Error {
                request_id: None,
                ..
            }
        ));

        server.shutdown();
    }

    #[tokio::test]
    async fn test_websocket_ping_frame() {
        let server = TestServer::start().await;
        let mut ws = connect(&server).await;

        // Raw WebSocket Ping frame, not ClientMessage::Ping
        ws.send(Message::Ping(vec![1, 2, 3].into())).await.unwrap();

        match timeout(Duration::from_secs(5), ws.next()).await {
            Ok(Some(Ok(Message::Pong(data)))) => assert_eq!(data.as_ref(), &[1, 2, 3]),
            Ok(other) => panic!("Expected Pong frame, got {:?}", other),
            Err(_) => panic!("Timeout waiting for Pong frame"),
        }

        server.shutdown();
    }

    #[tokio::test]
    async fn test_connections_share_state() {
        let server = TestServer::start().await;
        let mut writer = connect(&server).await;
        let mut reader = connect(&server).await;

        request(
            &mut writer,
            ClientMessage::insert(1, "pollution_reports", json!({"timestamp": 1})),
        )
        .await;

        let response = request(
            &mut reader,
            ClientMessage::list(1, "pollution_reports", "timestamp", true),
        )
        .await;
        let ServerMessage::Documents { documents, .. } = response else {
            panic!("Expected Documents, got {:?}", response);
        };
        assert_eq!(documents.len(), 1);

        server.shutdown();
    }
}
