//! End-to-end tests for the `check` command
//!
//! These tests invoke the actual CLI binary and validate its behavior
//! from a user's perspective.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_fs::prelude::*;
use predicates::prelude::*;

/// Test that check passes with secrets and the built-in manifest
#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_check_passes() {
    let mut cmd = cargo_bin_cmd!("rebrand");

    cmd.env("RENDEZVOUS_SERVER", "rdv.example.com:21116")
        .env("RS_PUB_KEY", "AAAApubkey=")
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("Preflight passed"));
}

/// Test that check fails fast on a missing secret
#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_check_missing_secret() {
    let mut cmd = cargo_bin_cmd!("rebrand");

    cmd.env_remove("RENDEZVOUS_SERVER")
        .env("RS_PUB_KEY", "AAAApubkey=")
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("RENDEZVOUS_SERVER"));
}

/// Test that check rejects a manifest with an invalid pattern
#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_check_invalid_manifest() {
    let temp = assert_fs::TempDir::new().unwrap();
    let manifest = temp.child("manifest.yaml");
    manifest
        .write_str(
            r#"
patches:
  - target: a.txt
    pattern: '['
    replacement: x
    description: broken
"#,
        )
        .unwrap();

    let mut cmd = cargo_bin_cmd!("rebrand");

    cmd.env("RENDEZVOUS_SERVER", "rdv.example.com:21116")
        .env("RS_PUB_KEY", "AAAApubkey=")
        .arg("check")
        .arg("--manifest")
        .arg(manifest.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid pattern"));
}
