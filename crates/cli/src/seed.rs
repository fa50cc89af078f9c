// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Demonstration reports inserted on first run.

use seasync_core::{PollutionType, ReportPayload};

const MINUTE_MS: i64 = 60 * 1000;
const HOUR_MS: i64 = 60 * MINUTE_MS;

/// (type, description, latitude, longitude, age in ms)
const DEMO_REPORTS: [(PollutionType, &str, f64, f64, i64); 5] = [
    (
        PollutionType::Plastic,
        "Large accumulation of plastic bottles and bags washed up on the beach near the pier. Approximately 50+ items visible.",
        33.7701,
        -118.1937,
        45 * MINUTE_MS,
    ),
    (
        PollutionType::OilSpill,
        "Small oil sheen detected in harbor area, appears to be coming from nearby boats. Roughly 20 meter diameter.",
        33.7501,
        -118.1737,
        3 * HOUR_MS,
    ),
    (
        PollutionType::Debris,
        "Fishing nets and ropes tangled in rocky area. Possible hazard to marine life.",
        33.7601,
        -118.1837,
        8 * HOUR_MS,
    ),
    (
        PollutionType::Chemical,
        "Unusual discoloration in water near industrial outflow. Strong chemical odor reported.",
        33.7401,
        -118.1637,
        24 * HOUR_MS,
    ),
    (
        PollutionType::Sewage,
        "Sewage overflow detected after heavy rainfall. Beach access restricted.",
        33.7301,
        -118.1537,
        48 * HOUR_MS,
    ),
];

/// The demonstration set, timestamped relative to `now_ms`, newest first.
pub fn demo_reports(now_ms: i64) -> Vec<ReportPayload> {
    DEMO_REPORTS
        .iter()
        .enumerate()
        .map(|(i, (pollution_type, description, latitude, longitude, age))| {
            ReportPayload::new(
                *pollution_type,
                *description,
                *latitude,
                *longitude,
                now_ms - age,
            )
            .with_user(format!("sample_user_{}", i + 1))
        })
        .collect()
}

#[cfg(test)]
#[path = "seed_tests.rs"]
mod tests;
