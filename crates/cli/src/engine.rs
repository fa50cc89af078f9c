// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Offline-first sync engine.
//!
//! The engine owns the pending queue and the read cache. Reports are
//! submitted directly while online and queued otherwise; the queue is
//! drained oldest-first whenever connectivity returns.
//!
//! ```text
//! add() ──online──► submit_now() ──ok──► fetch()
//!   │                   │
//!   │                 error
//!   ▼                   ▼
//! enqueue() ◄───────────┘
//!   │
//!   ▼
//! drain() ──► submit_now() per entry ──► fetch()
//! ```
//!
//! State sits behind `std::sync::Mutex` guards that are never held across an
//! await. Persistence happens under the queue lock, so the stored queue always
//! matches the in-memory one.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tokio_util::sync::CancellationToken;

use seasync_core::{PendingReport, Report, REPORTS_COLLECTION, REPORTS_SORT_FIELD};

use crate::connectivity::{ConnectivityObserver, ConnectivitySubscription, NetworkState};
use crate::error::{Error, Result};
use crate::remote::RemoteBackend;
use crate::store::QueueStore;

/// Result of a [`SyncEngine::drain`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrainOutcome {
    /// Another drain was in progress; nothing was done.
    AlreadyRunning,
    /// The queue was empty; nothing was done.
    Empty,
    /// A round ran over every entry queued when it started.
    Completed { synced: usize, failed: usize },
}

/// Result of a [`SyncEngine::add`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Stored by the remote backend under this id.
    Submitted { id: String },
    /// Kept in the pending queue for a later drain.
    Queued { local_id: String },
}

/// Clears the syncing flag when a drain round ends, however it ends.
struct SyncingGuard<'a>(&'a AtomicBool);

impl Drop for SyncingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Offline-first submission engine.
pub struct SyncEngine {
    remote: Arc<dyn RemoteBackend>,
    store: QueueStore,
    queue: Mutex<Vec<PendingReport>>,
    cache: Mutex<Vec<Report>>,
    online: AtomicBool,
    syncing: AtomicBool,
    upload_seq: AtomicU64,
}

impl SyncEngine {
    /// Create an engine with empty state, considered offline until told
    /// otherwise. Call [`load`](Self::load) to restore persisted state.
    pub fn new(remote: Arc<dyn RemoteBackend>, store: QueueStore) -> Self {
        SyncEngine {
            remote,
            store,
            queue: Mutex::new(Vec::new()),
            cache: Mutex::new(Vec::new()),
            online: AtomicBool::new(false),
            syncing: AtomicBool::new(false),
            upload_seq: AtomicU64::new(0),
        }
    }

    /// Restore the queue and the cache from the local store.
    pub fn load(&self) {
        *self.lock_queue() = self.store.load_queue();
        *self.lock_cache() = self.store.load_cache();
    }

    /// Pending entries, oldest first.
    pub fn queue(&self) -> Vec<PendingReport> {
        self.lock_queue().clone()
    }

    /// Last fetched reports, newest first.
    pub fn reports(&self) -> Vec<Report> {
        self.lock_cache().clone()
    }

    pub fn is_online(&self) -> bool {
        self.online.load(Ordering::Acquire)
    }

    /// Returns true while a drain round is running.
    pub fn is_syncing(&self) -> bool {
        self.syncing.load(Ordering::Acquire)
    }

    /// Returns true if an entry with this local id is queued.
    pub fn contains_local_id(&self, local_id: &str) -> bool {
        self.lock_queue().iter().any(|p| p.local_id == local_id)
    }

    /// Upload the photo, if any, then insert the report.
    ///
    /// Returns the id assigned by the backend. If the photo was uploaded but
    /// the insert failed, the photo stays orphaned and
    /// [`Error::PartialUpload`] is returned.
    pub async fn submit_now(&self, pending: &PendingReport) -> Result<String> {
        let photo_url = match &pending.photo_base64 {
            Some(photo) => Some(self.upload_photo(photo).await?),
            None => None,
        };

        let document = pending.to_document(photo_url.as_deref())?;
        match self.remote.insert(REPORTS_COLLECTION, document).await {
            Ok(id) => {
                tracing::debug!("Report {} stored as {}", pending.local_id, id);
                Ok(id)
            }
            Err(e) => match photo_url {
                Some(url) => {
                    tracing::warn!("Photo at {} orphaned: report insert failed: {}", url, e);
                    Err(Error::PartialUpload {
                        url,
                        reason: e.to_string(),
                    })
                }
                None => Err(e.into()),
            },
        }
    }

    async fn upload_photo(&self, photo_base64: &str) -> Result<String> {
        let bytes = STANDARD.decode(photo_base64).map_err(|e| {
            Error::Validation(seasync_core::Error::Validation {
                field: "photo",
                reason: e.to_string(),
            })
        })?;

        let seq = self.upload_seq.fetch_add(1, Ordering::Relaxed);
        let path = format!(
            "reports/pollution_{}-{}.jpg",
            chrono::Utc::now().timestamp_millis(),
            seq
        );
        let url = self.remote.upload_blob(&path, bytes).await?;
        tracing::debug!("Photo uploaded to {}", url);
        Ok(url)
    }

    /// Append an entry to the queue and persist it.
    ///
    /// Returns false if an entry with the same local id is already queued.
    pub fn enqueue(&self, pending: PendingReport) -> bool {
        let mut queue = self.lock_queue();
        if queue.iter().any(|p| p.local_id == pending.local_id) {
            tracing::debug!("Report {} already queued", pending.local_id);
            return false;
        }
        queue.push(pending);
        // Failure is logged by the store; the entry stays queued in memory.
        let _ = self.store.save_queue(&queue);
        true
    }

    /// Queue a report that was just added, renaming it with a `-<n>` suffix
    /// if its local id is already taken. Returns the id it was queued under.
    fn enqueue_new(&self, mut pending: PendingReport) -> String {
        let mut queue = self.lock_queue();
        let taken = |queue: &[PendingReport], id: &str| queue.iter().any(|p| p.local_id == id);
        if taken(&queue, &pending.local_id) {
            let base = pending.local_id.clone();
            let mut suffix = 2;
            while taken(&queue, &format!("{}-{}", base, suffix)) {
                suffix += 1;
            }
            pending.local_id = format!("{}-{}", base, suffix);
            tracing::debug!("Local id {} taken, queueing as {}", base, pending.local_id);
        }
        let local_id = pending.local_id.clone();
        queue.push(pending);
        let _ = self.store.save_queue(&queue);
        local_id
    }

    fn remove_from_queue(&self, local_id: &str) {
        let mut queue = self.lock_queue();
        queue.retain(|p| p.local_id != local_id);
        let _ = self.store.save_queue(&queue);
    }

    /// Submit every queued entry, oldest first.
    ///
    /// Successful entries leave the queue; failed ones stay in their original
    /// order. Entries added while the round runs are kept for the next one.
    /// Every round ends with a full fetch.
    pub async fn drain(&self) -> DrainOutcome {
        if self
            .syncing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!("Sync already in progress");
            return DrainOutcome::AlreadyRunning;
        }
        let _guard = SyncingGuard(&self.syncing);

        let pending = self.queue();
        if pending.is_empty() {
            return DrainOutcome::Empty;
        }

        tracing::info!("Syncing {} offline reports", pending.len());
        let mut synced = 0;
        let mut failed = 0;
        for report in &pending {
            match self.submit_now(report).await {
                Ok(_) => {
                    self.remove_from_queue(&report.local_id);
                    synced += 1;
                }
                Err(e) => {
                    tracing::warn!("Failed to sync report {}: {}", report.local_id, e);
                    failed += 1;
                }
            }
        }

        if failed == 0 {
            tracing::info!("All {} reports synced", synced);
        } else {
            tracing::warn!("{} of {} reports failed to sync", failed, pending.len());
        }

        if let Err(e) = self.fetch().await {
            tracing::warn!("Failed to refresh reports after sync: {}", e);
        }

        DrainOutcome::Completed { synced, failed }
    }

    /// Record a connectivity change. Going online drains the queue.
    ///
    /// Returns the drain outcome if a drain was triggered.
    pub async fn on_connectivity(&self, state: NetworkState) -> Option<DrainOutcome> {
        let online = state.is_online();
        let was_online = self.online.swap(online, Ordering::AcqRel);
        if online == was_online {
            return None;
        }

        if online {
            tracing::info!("Network is online");
            Some(self.drain().await)
        } else {
            tracing::info!("Network is offline");
            None
        }
    }

    /// Submit a report, queueing it if offline or if submission fails.
    pub async fn add(&self, pending: PendingReport) -> Submission {
        if !self.is_online() {
            tracing::info!("Offline: queueing report {}", pending.local_id);
            let local_id = self.enqueue_new(pending);
            return Submission::Queued { local_id };
        }

        match self.submit_now(&pending).await {
            Ok(id) => {
                tracing::info!("Report {} synced as {}", pending.local_id, id);
                if let Err(e) = self.fetch().await {
                    tracing::warn!("Failed to refresh reports: {}", e);
                }
                Submission::Submitted { id }
            }
            Err(e) => {
                tracing::warn!("Failed to submit report, queueing it: {}", e);
                let local_id = self.enqueue_new(pending);
                Submission::Queued { local_id }
            }
        }
    }

    /// Replace the cache with the backend's full report list.
    ///
    /// Returns the number of reports fetched. On failure the previous cache
    /// is kept.
    pub async fn fetch(&self) -> Result<usize> {
        let documents = self
            .remote
            .list_ordered(REPORTS_COLLECTION, REPORTS_SORT_FIELD, true)
            .await?;

        let reports: Vec<Report> = documents
            .into_iter()
            .filter_map(|document| match Report::from_document(document) {
                Ok(report) => Some(report),
                Err(e) => {
                    tracing::warn!("Skipping malformed report document: {}", e);
                    None
                }
            })
            .collect();

        let count = reports.len();
        let mut cache = self.lock_cache();
        *cache = reports;
        let _ = self.store.save_cache(&cache);
        tracing::debug!("Fetched {} reports", count);
        Ok(count)
    }

    /// Listen to an observer, draining on every offline→online transition.
    ///
    /// The first state seen is applied like any other, so it drains only if
    /// the engine was offline until then.
    pub fn subscribe(self: &Arc<Self>, observer: &dyn ConnectivityObserver) -> ConnectivitySubscription {
        let mut rx = observer.watch();
        let engine = Arc::clone(self);
        let cancel = CancellationToken::new();
        let token = cancel.clone();

        let handle = tokio::spawn(async move {
            let initial = *rx.borrow_and_update();
            engine.on_connectivity(initial).await;

            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    changed = rx.changed() => {
                        if changed.is_err() {
                            tracing::debug!("Connectivity observer closed");
                            break;
                        }
                        let state = *rx.borrow_and_update();
                        engine.on_connectivity(state).await;
                    }
                }
            }
        });

        ConnectivitySubscription::new(cancel, handle)
    }

    fn lock_queue(&self) -> MutexGuard<'_, Vec<PendingReport>> {
        self.queue.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_cache(&self) -> MutexGuard<'_, Vec<Report>> {
        self.cache.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
