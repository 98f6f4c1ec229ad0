//! Smoke tests for the todomvc-e2e binary
//!
//! Only commands that need neither a browser nor the network.

#![allow(deprecated)] // Command::cargo_bin
#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn todomvc_e2e() -> Command {
    Command::cargo_bin("todomvc-e2e").expect("todomvc-e2e binary should exist")
}

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_version_flag() {
    todomvc_e2e()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.1.0"));
}

#[test]
fn test_help_flag() {
    todomvc_e2e()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("run"));
}

#[test]
fn test_no_args_fails() {
    todomvc_e2e().assert().failure();
}

#[test]
fn test_run_help() {
    todomvc_e2e()
        .args(["run", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--workers"))
        .stdout(predicate::str::contains("--headed"));
}

// ============================================================================
// List
// ============================================================================

#[test]
fn test_list_everything() {
    todomvc_e2e()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("TC01"))
        .stdout(predicate::str::contains("TC32"))
        .stdout(predicate::str::contains("TC41"))
        .stdout(predicate::str::contains("TC42"))
        .stdout(predicate::str::contains("typescript-react"));
}

#[test]
fn test_list_one_variant() {
    todomvc_e2e()
        .args(["list", "--variant", "classic", "--category", "edge-input"])
        .assert()
        .success()
        .stdout(predicate::str::contains("TC29"))
        .stdout(predicate::str::contains("typescript-react").not());
}

#[test]
fn test_list_filter() {
    todomvc_e2e()
        .args(["-q", "list", "--filter", "emoji"])
        .assert()
        .success()
        .stdout(predicate::str::contains("TC14"))
        .stdout(predicate::str::contains("TC30"));
}

#[test]
fn test_list_unknown_variant_fails() {
    todomvc_e2e()
        .args(["list", "--variant", "vue"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown variant 'vue'"));
}

#[test]
fn test_run_rejects_bad_config_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("suite.yaml");
    fs::write(&path, "workers: 0\n").unwrap();
    todomvc_e2e()
        .args(["run", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("workers must be at least 1"));
}
