// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! On-device persistence.
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐
//! │ QueueStore  │────►│ LocalStore  │  (trait: SqliteStore, MemoryStore)
//! │ (typed keys)│     │ (key/value) │
//! └─────────────┘     └─────────────┘
//! ```
//!
//! [`QueueStore`] owns the well-known keys and the JSON encoding of the
//! pending queue and the read cache. Loads never fail: missing or corrupt
//! content reads as empty.

mod local;
mod queue;

pub use local::{LocalStore, MemoryStore, SqliteStore};
pub use queue::{QueueStore, CACHE_KEY, QUEUE_KEY, SEEDED_KEY};
