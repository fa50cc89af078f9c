// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Specs for `seasync add`, `seasync list` and `seasync status`.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use yare::parameterized;

/// Nothing listens on port 1, so every invocation runs offline.
const UNREACHABLE: &str = "ws://127.0.0.1:1";

fn seasync(temp: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("seasync");
    cmd.arg("--data-dir")
        .arg(temp.path())
        .arg("--remote")
        .arg(UNREACHABLE)
        .env_remove("SEASYNC_DATA_DIR")
        .env_remove("SEASYNC_LOG");
    cmd
}

fn add_json(temp: &TempDir, args: &[&str]) -> serde_json::Value {
    let output = seasync(temp)
        .arg("add")
        .args(args)
        .args(["-o", "json"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{:?}", output);
    serde_json::from_slice(&output.stdout).unwrap()
}

// =============================================================================
// add
// =============================================================================

#[test]
fn add_offline_queues_report() {
    let temp = TempDir::new().unwrap();

    seasync(&temp)
        .args(["add", "plastic", "Bottles on the beach"])
        .args(["--lat", "33.77", "--lon", "-118.19"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Queued report local_"))
        .stdout(predicate::str::contains("will sync when online"));
}

#[test]
fn add_json_reports_local_id() {
    let temp = TempDir::new().unwrap();

    let value = add_json(
        &temp,
        &["oil-spill", "Sheen near pier", "--lat", "33.75", "--lon", "-118.17", "-s", "high"],
    );

    assert_eq!(value["status"], "queued");
    assert!(value["localId"].as_str().unwrap().starts_with("local_"));
}

#[test]
fn add_with_photo_keeps_photo_in_queue() {
    let temp = TempDir::new().unwrap();
    let photo = temp.path().join("net.jpg");
    std::fs::write(&photo, [0xFF, 0xD8, 0xFF, 0xE0]).unwrap();

    add_json(
        &temp,
        &["debris", "Ghost net", "--lat", "33.76", "--lon", "-118.18", "--photo", photo.to_str().unwrap()],
    );

    let output = seasync(&temp).args(["list", "-o", "json"]).output().unwrap();
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["pending"][0]["hasPhoto"], true);
    assert!(value["pending"][0].get("photoBase64").is_none());
}

#[test]
fn add_missing_photo_file_fails() {
    let temp = TempDir::new().unwrap();

    seasync(&temp)
        .args(["add", "debris", "Ghost net", "--lat", "1", "--lon", "1"])
        .args(["--photo", "does-not-exist.jpg"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

#[parameterized(
    latitude_too_high = { "91", "0", "invalid latitude" },
    latitude_too_low = { "-90.5", "0", "invalid latitude" },
    longitude_too_high = { "0", "180.1", "invalid longitude" },
    longitude_too_low = { "0", "-181", "invalid longitude" },
)]
fn add_rejects_out_of_range_coordinates(lat: &str, lon: &str, message: &str) {
    let temp = TempDir::new().unwrap();

    seasync(&temp)
        .args(["add", "plastic", "Bottles", "--lat", lat, "--lon", lon])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(message));

    // Nothing reaches the queue
    seasync(&temp)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No reports"));
}

#[test]
fn add_rejects_unknown_type() {
    let temp = TempDir::new().unwrap();

    seasync(&temp)
        .args(["add", "lava", "Hot", "--lat", "1", "--lon", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid pollution type"));
}

#[test]
fn add_rejects_blank_description() {
    let temp = TempDir::new().unwrap();

    seasync(&temp)
        .args(["add", "plastic", "   ", "--lat", "1", "--lon", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be empty"));
}

// =============================================================================
// list
// =============================================================================

#[test]
fn list_empty_store() {
    let temp = TempDir::new().unwrap();

    seasync(&temp)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No reports"));
}

#[test]
fn list_shows_queued_reports_as_pending() {
    let temp = TempDir::new().unwrap();
    let queued = add_json(&temp, &["sewage", "Outfall smell", "--lat", "33.7", "--lon", "-118.2"]);
    let local_id = queued["localId"].as_str().unwrap();

    seasync(&temp)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("[pending] {}", local_id)))
        .stdout(predicate::str::contains("sewage"))
        .stdout(predicate::str::contains("Outfall smell"));
}

#[test]
fn list_json_separates_reports_and_pending() {
    let temp = TempDir::new().unwrap();
    add_json(&temp, &["chemical", "Foam", "--lat", "10", "--lon", "20"]);

    let output = seasync(&temp).args(["list", "-o", "json"]).output().unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();

    assert_eq!(value["reports"].as_array().unwrap().len(), 0);
    let pending = value["pending"].as_array().unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0]["type"], "chemical");
    assert_eq!(pending[0]["hasPhoto"], false);
}

// =============================================================================
// status
// =============================================================================

#[test]
fn status_reports_offline_and_queue_length() {
    let temp = TempDir::new().unwrap();
    add_json(&temp, &["other", "Odd slick", "--lat", "1", "--lon", "1"]);

    let output = seasync(&temp).args(["status", "-o", "json"]).output().unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();

    assert_eq!(value["remote"], UNREACHABLE);
    assert_eq!(value["online"], false);
    assert_eq!(value["queued"], 1);
    assert_eq!(value["reports"], 0);
}

#[test]
fn status_text_output() {
    let temp = TempDir::new().unwrap();

    seasync(&temp)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("online: no"))
        .stdout(predicate::str::contains("queued: 0"));
}

#[test]
fn invalid_config_is_reported() {
    let temp = TempDir::new().unwrap();
    std::fs::write(
        temp.path().join("config.toml"),
        "remote_url = \"http://not-a-websocket\"\n",
    )
    .unwrap();

    cargo_bin_cmd!("seasync")
        .arg("--data-dir")
        .arg(temp.path())
        .arg("status")
        .assert()
        .failure()
        .stderr(predicate::str::contains("config error"));
}
