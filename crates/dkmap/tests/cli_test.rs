//! Integration tests for the `dkmap` binary.
//!
//! Argument parsing, help output and configuration failures; none of
//! these reach NetBox or the database.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a command with env isolation: no secrets, no user config.
fn dkmap_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("dkmap");
    cmd.env("HOME", "/tmp/dkmap-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/dkmap-cli-test-nonexistent")
        .env_remove("NETBOX_API_TOKEN")
        .env_remove("DB_URL")
        .env_remove("NETBOX_URL")
        .env_remove("PROMETHEUS_URL")
        .env_remove("DKMAP_CONFIG")
        .env_remove("DKMAP_NETBOX_TOKEN")
        .env_remove("DKMAP_DB_URL")
        .env_remove("DKMAP_LIVENESS")
        .env_remove("RUST_LOG");
    cmd
}

fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = dkmap_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    dkmap_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("OUTPUT_DIR")
            .and(predicate::str::contains("NETBOX_API_TOKEN"))
            .and(predicate::str::contains("--timeout")),
    );
}

#[test]
fn test_version_flag() {
    dkmap_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("dkmap"));
}

#[test]
fn test_unknown_flag_is_usage_error() {
    dkmap_cmd()
        .args(["--frobnicate", "/tmp"])
        .assert()
        .code(2);
}

// ── Configuration failures ──────────────────────────────────────────

#[test]
fn test_missing_db_url_is_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let output = dkmap_cmd()
        .env("NETBOX_API_TOKEN", "t0ken")
        .arg(dir.path())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(78));
    let text = combined_output(&output);
    assert!(text.contains("DB_URL is not set"), "got:\n{text}");
    assert!(!dir.path().join("dk.json").exists());
}

#[test]
fn test_missing_explicit_config_file() {
    let dir = tempfile::tempdir().unwrap();
    dkmap_cmd()
        .arg("--config")
        .arg(dir.path().join("absent.toml"))
        .arg(dir.path())
        .assert()
        .code(78)
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_invalid_netbox_url_from_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("dkmap.toml");
    std::fs::write(&config, "netbox_url = \"not a url\"\n").unwrap();

    dkmap_cmd()
        .arg("--config")
        .arg(&config)
        .arg(dir.path())
        .assert()
        .code(78)
        .stderr(predicate::str::contains("netbox_url"));
}

#[test]
fn test_output_dir_must_exist() {
    let dir = tempfile::tempdir().unwrap();
    dkmap_cmd()
        .env("NETBOX_API_TOKEN", "t0ken")
        .env("DB_URL", "postgres://gis@localhost/gis")
        .arg(dir.path().join("missing"))
        .assert()
        .code(78)
        .stderr(predicate::str::contains("not an existing directory"));
}
