// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Typed persistence for the pending queue, the read cache, and the
//! first-run marker.
//!
//! Both collections are stored as JSON arrays under fixed keys, replaced
//! wholesale on every save. There is no schema version: content that no
//! longer parses is treated as absent.

use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use seasync_core::{PendingReport, Report};

use super::local::LocalStore;
use crate::error::{Error, Result};

/// Key holding the pending-submission queue.
pub const QUEUE_KEY: &str = "seasync_offline_queue";
/// Key holding the last fetched report set.
pub const CACHE_KEY: &str = "seasync_reports_cache";
/// Presence-only marker set once demonstration data was seeded.
pub const SEEDED_KEY: &str = "seasync_has_sample_reports";

/// Queue and cache persistence over any [`LocalStore`].
///
/// Saving the queue and saving the cache are independent atomic writes; a
/// crash between the two leaves a stale cache, which the next fetch replaces.
#[derive(Clone)]
pub struct QueueStore {
    store: Arc<dyn LocalStore>,
}

impl QueueStore {
    pub fn new(store: Arc<dyn LocalStore>) -> Self {
        QueueStore { store }
    }

    /// Load the pending queue, oldest entry first.
    pub fn load_queue(&self) -> Vec<PendingReport> {
        let queue: Vec<PendingReport> = self.load(QUEUE_KEY);
        if !queue.is_empty() {
            tracing::info!("Loaded {} offline reports from storage", queue.len());
        }
        queue
    }

    /// Overwrite the persisted queue.
    pub fn save_queue(&self, queue: &[PendingReport]) -> Result<()> {
        self.save(QUEUE_KEY, queue)?;
        tracing::debug!("Saved {} reports to offline queue", queue.len());
        Ok(())
    }

    /// Load the cached report list.
    pub fn load_cache(&self) -> Vec<Report> {
        let cached: Vec<Report> = self.load(CACHE_KEY);
        if !cached.is_empty() {
            tracing::info!("Loaded {} cached reports", cached.len());
        }
        cached
    }

    /// Overwrite the cached report list.
    pub fn save_cache(&self, reports: &[Report]) -> Result<()> {
        self.save(CACHE_KEY, reports)
    }

    /// Returns true once demonstration data has been seeded.
    ///
    /// An unreadable store counts as seeded so a flaky disk never causes
    /// the demonstration set to be inserted twice.
    pub fn is_seeded(&self) -> bool {
        match self.store.get(SEEDED_KEY) {
            Ok(value) => value.is_some(),
            Err(e) => {
                tracing::warn!("Failed to read seeded marker: {}", e);
                true
            }
        }
    }

    /// Record that demonstration data has been seeded.
    pub fn mark_seeded(&self) -> Result<()> {
        self.store
            .set(SEEDED_KEY, "true")
            .map_err(|e| Error::Persistence(format!("failed to set seeded marker: {}", e)))
    }

    fn load<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let stored = match self.store.get(key) {
            Ok(Some(stored)) => stored,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", key, e);
                return Vec::new();
            }
        };

        match serde_json::from_str(&stored) {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!("Discarding corrupt {}: {}", key, e);
                Vec::new()
            }
        }
    }

    fn save<T: Serialize>(&self, key: &str, records: &[T]) -> Result<()> {
        let json = serde_json::to_string(records)?;
        self.store.set(key, &json).map_err(|e| {
            tracing::warn!("Failed to save {}: {}", key, e);
            Error::Persistence(format!("failed to save {}: {}", key, e))
        })
    }
}
