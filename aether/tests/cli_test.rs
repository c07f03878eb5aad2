//! CLI tests for the aether binary
//!
//! None of these reach the network: each one fails or finishes before a
//! model call would be made.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Command isolated from the user's config, logs and credentials
fn aether_cmd(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("aether").expect("Failed to find aether binary");
    cmd.current_dir(home.path())
        .env("HOME", home.path())
        .env("XDG_DATA_HOME", home.path().join("data"))
        .env("XDG_CONFIG_HOME", home.path().join("config"))
        .env_remove("API_KEY")
        .env_remove("GEMINI_API_KEY")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_lists_features() {
    let home = TempDir::new().unwrap();

    aether_cmd(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("goal"))
        .stdout(predicate::str::contains("simulate"))
        .stdout(predicate::str::contains("aether.log"));
}

#[test]
fn test_no_command_prints_help() {
    let home = TempDir::new().unwrap();

    aether_cmd(&home)
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn test_missing_credential_is_reported_on_first_call() {
    let home = TempDir::new().unwrap();

    aether_cmd(&home)
        .args(["route", "help me plan a marathon"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("API_KEY"))
        .stderr(predicate::str::contains("GEMINI_API_KEY"));
}

#[test]
fn test_blank_goal_is_rejected() {
    let home = TempDir::new().unwrap();

    aether_cmd(&home)
        .args(["goal", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Enter a goal first."));
}

#[test]
fn test_decision_without_factors_is_rejected() {
    let home = TempDir::new().unwrap();

    aether_cmd(&home)
        .args(["decide", "Move to Berlin?"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Add at least one factor first."));
}

#[test]
fn test_out_of_range_factor_is_rejected() {
    let home = TempDir::new().unwrap();

    aether_cmd(&home)
        .args(["decide", "Move to Berlin?", "-F", "Cost:11"])
        .assert()
        .failure();
}

#[test]
fn test_unknown_format_is_rejected() {
    let home = TempDir::new().unwrap();

    aether_cmd(&home)
        .args(["--format", "table", "route", "anything"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown format"));
}

#[test]
fn test_missing_config_file_fails() {
    let home = TempDir::new().unwrap();
    let missing = home.path().join("nope.yml");

    aether_cmd(&home)
        .args(["-c", missing.to_str().unwrap(), "route", "anything"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load config"));
}
