// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Remote submission client.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────────┐     ┌────────────────┐
//! │ SyncEngine  │────►│  RemoteBackend   │────►│ seasync-remote │
//! │             │◄────│     (trait)      │◄────│     server     │
//! └─────────────┘     └──────────────────┘     └────────────────┘
//!                       │            │
//!               WebSocketBackend  MemoryBackend
//! ```
//!
//! The backend is a plain document store plus blob store. Nothing is
//! transactional across calls: a blob upload followed by a failed insert
//! leaves the blob in place.

mod backend;
mod memory;
mod websocket;

pub use backend::{RemoteBackend, RemoteError, RemoteFuture, RemoteResult};
pub use memory::MemoryBackend;
pub use websocket::{WebSocketBackend, WebSocketConfig};
