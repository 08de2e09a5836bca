//! CLI surface tests
//!
//! Only paths that stop before any network I/O are exercised here.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn gn(temp: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("gn").expect("binary should build");
    cmd.current_dir(temp.path())
        .env("XDG_DATA_HOME", temp.path().join("data"))
        .env("XDG_CONFIG_HOME", temp.path().join("config"))
        .env("HOME", temp.path())
        .env_remove("GIST_NOTIFY_PASSWORD")
        .env_remove("GITHUB_TOKEN");
    cmd
}

#[test]
fn test_help_lists_arguments() {
    let temp = TempDir::new().unwrap();
    gn(&temp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("RECIPIENT"))
        .stdout(predicate::str::contains("--smtp-server"))
        .stdout(predicate::str::contains("--watermark-file"));
}

#[test]
fn test_missing_arguments_fail() {
    let temp = TempDir::new().unwrap();
    gn(&temp).arg("octocat").assert().failure();
}

#[test]
fn test_missing_password_fails_without_touching_watermark() {
    let temp = TempDir::new().unwrap();
    let watermark = temp.path().join("last-run");

    gn(&temp)
        .args(["octocat", "me@example.com", "bot@example.com", "--watermark-file"])
        .arg(&watermark)
        .assert()
        .failure()
        .stderr(predicate::str::contains("GIST_NOTIFY_PASSWORD"));

    assert!(!watermark.exists());
}

#[test]
fn test_invalid_recipient_fails_early() {
    let temp = TempDir::new().unwrap();
    let watermark = temp.path().join("last-run");

    gn(&temp)
        .args(["octocat", "not an address", "bot@example.com", "pw", "--watermark-file"])
        .arg(&watermark)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid mail settings"));

    assert!(!watermark.exists());
}

#[test]
fn test_password_from_configured_env_var() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("gn.yml");
    std::fs::write(&config, "mail:\n  password-env: GN_TEST_ALT_PASSWORD\n").unwrap();

    // Empty value counts as unset, so the error names the configured variable
    gn(&temp)
        .env("GN_TEST_ALT_PASSWORD", "")
        .args(["octocat", "me@example.com", "bot@example.com", "--config"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("GN_TEST_ALT_PASSWORD"));
}
