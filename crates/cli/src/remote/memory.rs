// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! In-process backend.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

use serde_json::Value;
use seasync_core::document::{sort_documents, with_id};

use super::backend::{RemoteBackend, RemoteError, RemoteFuture, RemoteResult};

/// Backend that keeps collections and blobs in memory.
///
/// Useful for dry runs and for tests that need a backend which always
/// succeeds.
pub struct MemoryBackend {
    base_url: String,
    next_id: AtomicU64,
    collections: Mutex<HashMap<String, Vec<Value>>>,
    blobs: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        MemoryBackend {
            base_url: base_url.into(),
            next_id: AtomicU64::new(1),
            collections: Mutex::new(HashMap::new()),
            blobs: Mutex::new(HashMap::new()),
        }
    }

    /// Number of documents stored in a collection.
    pub fn count(&self, collection: &str) -> usize {
        self.collections()
            .map(|c| c.get(collection).map_or(0, Vec::len))
            .unwrap_or(0)
    }

    /// Content of a stored blob.
    pub fn blob(&self, path: &str) -> Option<Vec<u8>> {
        self.blobs.lock().ok()?.get(path).cloned()
    }

    fn collections(&self) -> RemoteResult<MutexGuard<'_, HashMap<String, Vec<Value>>>> {
        self.collections
            .lock()
            .map_err(|_| RemoteError::Rejected("backend lock poisoned".to_string()))
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new("memory://")
    }
}

impl RemoteBackend for MemoryBackend {
    fn insert<'a>(&'a self, collection: &'a str, document: Value) -> RemoteFuture<'a, String> {
        Box::pin(async move {
            if !document.is_object() {
                return Err(RemoteError::Rejected("document must be an object".into()));
            }
            let id = format!("doc-{}", self.next_id.fetch_add(1, Ordering::Relaxed));
            self.collections()?
                .entry(collection.to_string())
                .or_default()
                .push(with_id(document, &id));
            Ok(id)
        })
    }

    fn list_ordered<'a>(
        &'a self,
        collection: &'a str,
        sort_field: &'a str,
        descending: bool,
    ) -> RemoteFuture<'a, Vec<Value>> {
        Box::pin(async move {
            let mut documents = self
                .collections()?
                .get(collection)
                .cloned()
                .unwrap_or_default();
            sort_documents(&mut documents, sort_field, descending);
            Ok(documents)
        })
    }

    fn upload_blob<'a>(&'a self, path: &'a str, bytes: Vec<u8>) -> RemoteFuture<'a, String> {
        Box::pin(async move {
            self.blobs
                .lock()
                .map_err(|_| RemoteError::Rejected("backend lock poisoned".to_string()))?
                .insert(path.to_string(), bytes);
            Ok(format!("{}{}", self.base_url, path))
        })
    }
}
