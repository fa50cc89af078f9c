// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! WebSocket protocol messages between the device and the remote backend.
//!
//! The protocol is request/response:
//! - Client sends document inserts, ordered list queries, and blob uploads,
//!   each tagged with a client-chosen request id
//! - Server answers each request with a message echoing that id

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Messages sent from client to server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Insert a document into a collection.
    ///
    /// The server assigns the document id.
    Insert {
        request_id: u64,
        collection: String,
        document: Value,
    },

    /// List every document of a collection, ordered by one field.
    List {
        request_id: u64,
        collection: String,
        sort_field: String,
        descending: bool,
    },

    /// Store a blob under a path and return its public URL.
    UploadBlob {
        request_id: u64,
        path: String,
        /// Blob content, base64 encoded.
        data_base64: String,
    },

    /// Ping message for keepalive.
    Ping {
        /// Client-chosen ID echoed in Pong.
        id: u64,
    },
}

/// Messages sent from server to client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Response to an Insert request.
    Inserted { request_id: u64, id: String },

    /// Response to a List request.
    ///
    /// Each document carries its `id` field.
    Documents {
        request_id: u64,
        documents: Vec<Value>,
    },

    /// Response to an UploadBlob request.
    Uploaded { request_id: u64, url: String },

    /// Pong response to client Ping.
    Pong {
        /// Echoed from the Ping message.
        id: u64,
    },

    /// Error message.
    Error {
        /// Id of the failed request, if the request could be parsed.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        request_id: Option<u64>,
        /// Human-readable error description.
        message: String,
    },
}

impl ClientMessage {
    /// Creates an Insert message.
    pub fn insert(request_id: u64, collection: impl Into<String>, document: Value) -> Self {
        ClientMessage::Insert {
            request_id,
            collection: collection.into(),
            document,
        }
    }

    /// Creates a List message.
    pub fn list(
        request_id: u64,
        collection: impl Into<String>,
        sort_field: impl Into<String>,
        descending: bool,
    ) -> Self {
        ClientMessage::List {
            request_id,
            collection: collection.into(),
            sort_field: sort_field.into(),
            descending,
        }
    }

    /// Creates an UploadBlob message.
    pub fn upload_blob(request_id: u64, path: impl Into<String>, data_base64: String) -> Self {
        ClientMessage::UploadBlob {
            request_id,
            path: path.into(),
            data_base64,
        }
    }

    /// Creates a Ping message.
    pub fn ping(id: u64) -> Self {
        ClientMessage::Ping { id }
    }

    /// Returns the request id a response must echo, if any.
    pub fn request_id(&self) -> Option<u64> {
        match self {
            ClientMessage::Insert { request_id, .. }
            | ClientMessage::List { request_id, .. }
            | ClientMessage::UploadBlob { request_id, .. } => Some(*request_id),
            ClientMessage::Ping { .. } => None,
        }
    }

    /// Serializes the message to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserializes the message from JSON.
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}

impl ServerMessage {
    /// Creates an Inserted message.
    pub fn inserted(request_id: u64, id: impl Into<String>) -> Self {
        ServerMessage::Inserted {
            request_id,
            id: id.into(),
        }
    }

    /// Creates a Documents message.
    pub fn documents(request_id: u64, documents: Vec<Value>) -> Self {
        ServerMessage::Documents {
            request_id,
            documents,
        }
    }

    /// Creates an Uploaded message.
    pub fn uploaded(request_id: u64, url: impl Into<String>) -> Self {
        ServerMessage::Uploaded {
            request_id,
            url: url.into(),
        }
    }

    /// Creates a Pong message.
    pub fn pong(id: u64) -> Self {
        ServerMessage::Pong { id }
    }

    /// Creates an Error message.
    pub fn error(request_id: Option<u64>, message: impl Into<String>) -> Self {
        ServerMessage::Error {
            request_id,
            message: message.into(),
        }
    }

    /// Returns the request id this message answers, if any.
    pub fn request_id(&self) -> Option<u64> {
        match self {
            ServerMessage::Inserted { request_id, .. }
            | ServerMessage::Documents { request_id, .. }
            | ServerMessage::Uploaded { request_id, .. } => Some(*request_id),
            ServerMessage::Error { request_id, .. } => *request_id,
            ServerMessage::Pong { .. } => None,
        }
    }

    /// Serializes the message to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserializes the message from JSON.
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod tests;
