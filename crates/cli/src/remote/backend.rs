// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Backend abstraction for the remote document and blob store.
//!
//! Provides a trait-based layer that enables:
//! - Real WebSocket backends for production
//! - In-memory and scripted backends for testing

use std::future::Future;
use std::pin::Pin;

use serde_json::Value;

/// Error type for remote operations.
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    /// Connection failed.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Connection closed unexpectedly.
    #[error("connection closed")]
    ConnectionClosed,

    /// Send failed.
    #[error("send failed: {0}")]
    SendFailed(String),

    /// Receive failed.
    #[error("receive failed: {0}")]
    ReceiveFailed(String),

    /// No response within the configured timeout.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// The backend rejected the request.
    #[error("backend rejected request: {0}")]
    Rejected(String),

    /// Serialization/deserialization failed.
    #[error("serialization error: {0}")]
    SerializationError(String),
}

/// Result type for remote operations.
pub type RemoteResult<T> = Result<T, RemoteError>;

/// Boxed future returned by [`RemoteBackend`] methods.
pub type RemoteFuture<'a, T> = Pin<Box<dyn Future<Output = RemoteResult<T>> + Send + 'a>>;

/// Remote document store and blob store.
///
/// Shared between tasks, so every method takes `&self`.
pub trait RemoteBackend: Send + Sync {
    /// Insert a document into a collection, returning the id the backend assigned.
    fn insert<'a>(&'a self, collection: &'a str, document: Value) -> RemoteFuture<'a, String>;

    /// List every document of a collection ordered by `sort_field`.
    ///
    /// Each returned document carries its `id` field.
    fn list_ordered<'a>(
        &'a self,
        collection: &'a str,
        sort_field: &'a str,
        descending: bool,
    ) -> RemoteFuture<'a, Vec<Value>>;

    /// Store a blob under `path`, returning its public URL.
    fn upload_blob<'a>(&'a self, path: &'a str, bytes: Vec<u8>) -> RemoteFuture<'a, String>;
}
