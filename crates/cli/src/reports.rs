// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Report store facade.
//!
//! [`ReportStore`] is what a user interface talks to: it owns one
//! [`SyncEngine`], runs the startup sequence, validates new reports, and
//! exposes a read-only [`StoreSnapshot`] of the current state.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::Utc;
use seasync_core::{
    generate_unique_local_id, validate_draft, PendingReport, Report, ReportDraft,
    REPORTS_COLLECTION,
};

use crate::connectivity::{ConnectivityObserver, ConnectivitySubscription, NetworkState};
use crate::engine::{DrainOutcome, Submission, SyncEngine};
use crate::error::{Error, Result};
use crate::remote::RemoteBackend;
use crate::seed::demo_reports;
use crate::store::{LocalStore, QueueStore};

/// Point-in-time view of the store.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreSnapshot {
    /// Cached reports, newest first.
    pub reports: Vec<Report>,
    /// Pending submissions, oldest first.
    pub queue: Vec<PendingReport>,
    pub is_online: bool,
    pub is_syncing: bool,
    /// True until the startup fetch has finished, successfully or not.
    pub is_loading: bool,
}

pub struct ReportStore {
    engine: Arc<SyncEngine>,
    remote: Arc<dyn RemoteBackend>,
    store: QueueStore,
    loading: AtomicBool,
    seeding: AtomicBool,
}

impl ReportStore {
    /// Open the store and run the startup sequence.
    ///
    /// Loads the persisted queue and cache, fetches the current reports, and
    /// seeds demonstration data on first run. Network failures along the way
    /// are logged and leave the persisted state in place.
    pub async fn open(remote: Arc<dyn RemoteBackend>, local: Arc<dyn LocalStore>) -> Self {
        let store = QueueStore::new(local);
        let engine = Arc::new(SyncEngine::new(remote.clone(), store.clone()));
        let reports = ReportStore {
            engine,
            remote,
            store,
            loading: AtomicBool::new(true),
            seeding: AtomicBool::new(false),
        };
        reports.initialize().await;
        reports
    }

    async fn initialize(&self) {
        self.engine.load();

        if let Err(e) = self.engine.fetch().await {
            tracing::warn!("Failed to fetch reports, showing cached data: {}", e);
        }
        self.loading.store(false, Ordering::Release);

        self.seed_demo_data().await;
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            reports: self.engine.reports(),
            queue: self.engine.queue(),
            is_online: self.engine.is_online(),
            is_syncing: self.engine.is_syncing(),
            is_loading: self.loading.load(Ordering::Acquire),
        }
    }

    /// The underlying engine.
    pub fn engine(&self) -> &Arc<SyncEngine> {
        &self.engine
    }

    /// Validate and submit a new report.
    ///
    /// Only validation errors are returned. Network trouble is absorbed by
    /// queueing the report.
    pub async fn add_report(&self, draft: ReportDraft) -> Result<Submission> {
        validate_draft(&draft).map_err(Error::Validation)?;

        let local_id = generate_unique_local_id(&draft.payload, &Utc::now(), |id| {
            self.engine.contains_local_id(id)
        });
        Ok(self.engine.add(draft.into_pending(local_id)).await)
    }

    /// Re-fetch the full report list.
    pub async fn refresh(&self) -> Result<usize> {
        self.engine.fetch().await
    }

    /// Drain the queue now.
    pub async fn force_sync(&self) -> DrainOutcome {
        self.engine.drain().await
    }

    /// Apply a connectivity state observed outside any subscription.
    pub async fn update_connectivity(&self, state: NetworkState) -> Option<DrainOutcome> {
        self.engine.on_connectivity(state).await
    }

    /// Subscribe the engine to an observer.
    pub fn watch_connectivity(&self, observer: &dyn ConnectivityObserver) -> ConnectivitySubscription {
        self.engine.subscribe(observer)
    }

    /// Returns true once demonstration data was seeded on this installation.
    pub fn is_seeded(&self) -> bool {
        self.store.is_seeded()
    }

    /// Insert the demonstration reports unless this installation already did.
    ///
    /// Returns true if the reports were inserted by this call. The marker is
    /// only set once every insert succeeded, so a failed attempt is retried
    /// on the next start.
    pub async fn seed_demo_data(&self) -> bool {
        if self.store.is_seeded() {
            return false;
        }
        if self
            .seeding
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return false;
        }

        let result = self.insert_demo_reports().await;
        if result.is_ok() {
            if let Err(e) = self.store.mark_seeded() {
                tracing::warn!("Sample reports will be added again: {}", e);
            }
        }
        self.seeding.store(false, Ordering::Release);

        match result {
            Ok(count) => {
                tracing::info!("Added {} sample reports", count);
                if let Err(e) = self.engine.fetch().await {
                    tracing::warn!("Failed to refresh reports: {}", e);
                }
                true
            }
            Err(e) => {
                tracing::warn!("Failed to add sample reports: {}", e);
                false
            }
        }
    }

    async fn insert_demo_reports(&self) -> Result<usize> {
        let payloads = demo_reports(Utc::now().timestamp_millis());
        for payload in &payloads {
            let document = serde_json::to_value(payload)?;
            self.remote.insert(REPORTS_COLLECTION, document).await?;
        }
        Ok(payloads.len())
    }
}

#[cfg(test)]
#[path = "reports_tests.rs"]
mod tests;
