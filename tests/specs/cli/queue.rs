// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Specs for the offline queue across invocations: `sync`, `refresh`, `seed`.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

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

fn queue_report(temp: &TempDir, description: &str) -> String {
    let output = seasync(temp)
        .args(["add", "plastic", description, "--lat", "33.77", "--lon", "-118.19"])
        .args(["-o", "json"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{:?}", output);
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    value["localId"].as_str().unwrap().to_string()
}

fn pending_ids(temp: &TempDir) -> Vec<String> {
    let output = seasync(temp).args(["list", "-o", "json"]).output().unwrap();
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    value["pending"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["localId"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn queue_persists_across_invocations_in_order() {
    let temp = TempDir::new().unwrap();
    let first = queue_report(&temp, "first");
    let second = queue_report(&temp, "second");
    let third = queue_report(&temp, "third");

    assert_eq!(pending_ids(&temp), vec![first, second, third]);
}

#[test]
fn same_description_gets_distinct_local_ids() {
    let temp = TempDir::new().unwrap();
    let ids: Vec<String> = (0..3).map(|_| queue_report(&temp, "same")).collect();

    let mut unique = ids.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), 3);
}

#[test]
fn sync_offline_keeps_queue() {
    let temp = TempDir::new().unwrap();
    let first = queue_report(&temp, "first");
    let second = queue_report(&temp, "second");

    seasync(&temp)
        .arg("sync")
        .assert()
        .success()
        .stdout(predicate::str::contains("Synced 0 reports, 2 failed"))
        .stdout(predicate::str::contains("2 reports remain queued"));

    assert_eq!(pending_ids(&temp), vec![first, second]);
}

#[test]
fn sync_with_empty_queue_is_noop() {
    let temp = TempDir::new().unwrap();

    seasync(&temp)
        .arg("sync")
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to sync"));
}

#[test]
fn refresh_offline_fails() {
    let temp = TempDir::new().unwrap();

    seasync(&temp)
        .arg("refresh")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn seed_offline_fails_and_can_retry() {
    let temp = TempDir::new().unwrap();

    for _ in 0..2 {
        seasync(&temp)
            .arg("seed")
            .assert()
            .failure()
            .stderr(predicate::str::contains("could not add sample reports"));
    }
}

#[test]
fn queue_survives_other_commands() {
    let temp = TempDir::new().unwrap();
    let local_id = queue_report(&temp, "kept");

    seasync(&temp).arg("status").assert().success();
    seasync(&temp).arg("refresh").assert().failure();
    seasync(&temp).arg("seed").assert().failure();

    assert_eq!(pending_ids(&temp), vec![local_id]);
}
