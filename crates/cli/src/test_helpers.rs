// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers.

#![allow(clippy::unwrap_used)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use serde_json::Value;
use seasync_core::document::{sort_documents, with_id};
use seasync_core::{PendingReport, PollutionType, Report, ReportPayload};

use crate::error::{Error, Result};
use crate::remote::{RemoteBackend, RemoteError, RemoteFuture};
use crate::store::LocalStore;

/// Capture time used by every generated report.
pub const BASE_TIMESTAMP: i64 = 1_700_000_000_000;

/// Create a pending report whose description is `report {n}`.
pub fn make_pending(n: u32) -> PendingReport {
    PendingReport {
        local_id: format!("local_{}_{:09x}", BASE_TIMESTAMP, n),
        payload: ReportPayload::new(
            PollutionType::Plastic,
            format!("report {}", n),
            33.77,
            -118.19,
            BASE_TIMESTAMP + i64::from(n),
        ),
        photo_base64: None,
    }
}

/// Create a confirmed report with the given backend id and timestamp.
pub fn make_report(id: &str, timestamp: i64) -> Report {
    Report {
        id: id.to_string(),
        payload: ReportPayload::new(
            PollutionType::Debris,
            format!("cached {}", id),
            33.76,
            -118.18,
            timestamp,
        ),
        photo_url: None,
        synced: true,
    }
}

/// Local store whose every operation fails.
pub struct FailingStore;

impl LocalStore for FailingStore {
    fn get(&self, _key: &str) -> Result<Option<String>> {
        Err(Error::Persistence("store unavailable".to_string()))
    }

    fn set(&self, _key: &str, _value: &str) -> Result<()> {
        Err(Error::Persistence("store unavailable".to_string()))
    }
}

#[derive(Default)]
struct MockState {
    documents: Vec<Value>,
    blobs: Vec<String>,
    inserts_by_description: HashMap<String, usize>,
    failing_descriptions: HashSet<String>,
}

/// Scriptable backend recording every call.
///
/// Each call yields to the scheduler before doing anything, so concurrent
/// callers interleave the way they would against a real network.
#[derive(Default)]
pub struct MockBackend {
    state: Mutex<MockState>,
    offline: AtomicBool,
    fail_uploads: AtomicBool,
    fail_lists: AtomicBool,
    inserts: AtomicUsize,
    lists: AtomicUsize,
    uploads: AtomicUsize,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every call with a connection error.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Reject inserts of reports with this description.
    pub fn fail_description(&self, description: &str) {
        self.state
            .lock()
            .unwrap()
            .failing_descriptions
            .insert(description.to_string());
    }

    /// Accept inserts of reports with this description again.
    pub fn heal_description(&self, description: &str) {
        self.state
            .lock()
            .unwrap()
            .failing_descriptions
            .remove(description);
    }

    pub fn set_fail_uploads(&self, fail: bool) {
        self.fail_uploads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_lists(&self, fail: bool) {
        self.fail_lists.store(fail, Ordering::SeqCst);
    }

    /// Insert a document directly, bypassing counters.
    pub fn seed_document(&self, document: Value) {
        let mut state = self.state.lock().unwrap();
        let id = format!("doc-{}", state.documents.len() + 1);
        state.documents.push(with_id(document, &id));
    }

    /// Number of attempted inserts, successful or not.
    pub fn insert_calls(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }

    /// Number of list calls, successful or not.
    pub fn list_calls(&self) -> usize {
        self.lists.load(Ordering::SeqCst)
    }

    /// Number of attempted blob uploads.
    pub fn upload_calls(&self) -> usize {
        self.uploads.load(Ordering::SeqCst)
    }

    /// Successful inserts of reports with this description.
    pub fn inserted_count(&self, description: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .inserts_by_description
            .get(description)
            .copied()
            .unwrap_or(0)
    }

    /// Descriptions of stored documents in insertion order.
    pub fn stored_descriptions(&self) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .documents
            .iter()
            .filter_map(|d| d["description"].as_str().map(str::to_string))
            .collect()
    }

    /// All stored documents in insertion order.
    pub fn documents(&self) -> Vec<Value> {
        self.state.lock().unwrap().documents.clone()
    }

    /// Paths of uploaded blobs in upload order.
    pub fn blob_paths(&self) -> Vec<String> {
        self.state.lock().unwrap().blobs.clone()
    }

    fn check_online(&self) -> std::result::Result<(), RemoteError> {
        if self.offline.load(Ordering::SeqCst) {
            Err(RemoteError::ConnectionFailed("network unreachable".to_string()))
        } else {
            Ok(())
        }
    }
}

impl RemoteBackend for MockBackend {
    fn insert<'a>(&'a self, _collection: &'a str, document: Value) -> RemoteFuture<'a, String> {
        Box::pin(async move {
            tokio::task::yield_now().await;
            self.inserts.fetch_add(1, Ordering::SeqCst);
            self.check_online()?;

            let description = document["description"]
                .as_str()
                .unwrap_or_default()
                .to_string();
            let mut state = self.state.lock().unwrap();
            if state.failing_descriptions.contains(&description) {
                return Err(RemoteError::Rejected(format!(
                    "insert of '{}' refused",
                    description
                )));
            }
            let id = format!("doc-{}", state.documents.len() + 1);
            state.documents.push(with_id(document, &id));
            *state.inserts_by_description.entry(description).or_insert(0) += 1;
            Ok(id)
        })
    }

    fn list_ordered<'a>(
        &'a self,
        _collection: &'a str,
        sort_field: &'a str,
        descending: bool,
    ) -> RemoteFuture<'a, Vec<Value>> {
        Box::pin(async move {
            tokio::task::yield_now().await;
            self.lists.fetch_add(1, Ordering::SeqCst);
            self.check_online()?;
            if self.fail_lists.load(Ordering::SeqCst) {
                return Err(RemoteError::Timeout(10));
            }

            let mut documents = self.state.lock().unwrap().documents.clone();
            sort_documents(&mut documents, sort_field, descending);
            Ok(documents)
        })
    }

    fn upload_blob<'a>(&'a self, path: &'a str, _bytes: Vec<u8>) -> RemoteFuture<'a, String> {
        Box::pin(async move {
            tokio::task::yield_now().await;
            self.uploads.fetch_add(1, Ordering::SeqCst);
            self.check_online()?;
            if self.fail_uploads.load(Ordering::SeqCst) {
                return Err(RemoteError::Rejected("storage quota exceeded".to_string()));
            }

            self.state.lock().unwrap().blobs.push(path.to_string());
            Ok(format!("https://blobs.test/{}", path))
        })
    }
}
