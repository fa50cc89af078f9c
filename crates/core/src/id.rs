// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Local identifiers for queued reports.

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

use crate::report::ReportPayload;

/// Prefix shared by every device-generated identifier.
pub const LOCAL_ID_PREFIX: &str = "local_";

/// Generate a local ID from a report payload and its creation time.
/// Format: local_{epoch-ms}_{hash} where hash is the first 9 hex chars of
/// SHA256(description + timestamp + creation time with nanoseconds).
pub fn generate_local_id(payload: &ReportPayload, created_at: &DateTime<Utc>) -> String {
    let input = format!(
        "{}{}{}",
        payload.description,
        payload.timestamp,
        created_at.to_rfc3339_opts(chrono::SecondsFormat::Nanos, true)
    );
    let hash = Sha256::digest(input.as_bytes());
    let mut short_hash = hex::encode(&hash[..5]);
    short_hash.truncate(9);
    format!(
        "{}{}_{}",
        LOCAL_ID_PREFIX,
        created_at.timestamp_millis(),
        short_hash
    )
}

/// Generate a local ID that `exists` reports as unused, appending an
/// incrementing suffix on collision.
pub fn generate_unique_local_id<F>(
    payload: &ReportPayload,
    created_at: &DateTime<Utc>,
    exists: F,
) -> String
where
    F: Fn(&str) -> bool,
{
    let base_id = generate_local_id(payload, created_at);

    if !exists(&base_id) {
        return base_id;
    }

    let mut suffix = 2;
    loop {
        let id = format!("{}-{}", base_id, suffix);
        if !exists(&id) {
            return id;
        }
        suffix += 1;
    }
}

/// Returns true if the identifier was generated on-device.
pub fn is_local_id(id: &str) -> bool {
    id.starts_with(LOCAL_ID_PREFIX)
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
