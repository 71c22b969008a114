//! Integration tests for the mirror CLI binary.
//!
//! These tests exercise the actual compiled binary using assert_cmd.

use assert_cmd::Command;
use mirror_test_utils::MirrorFixture;
use predicates::prelude::*;
use std::fs;

/// Get a Command for the mirror binary
fn mirror_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("mirror"))
}

/// Positional arguments for a fixture, with a five second interval.
fn positional(fixture: &MirrorFixture) -> Vec<String> {
    [fixture.source(), fixture.replica(), fixture.log_file()]
        .iter()
        .map(|p| p.display().to_string())
        .chain(std::iter::once("00:00:05".to_string()))
        .collect()
}

// ============================================================================
// Help and Version Tests
// ============================================================================

#[test]
fn test_help_output() {
    mirror_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Directory Mirror"))
        .stdout(predicate::str::contains("--on-collision"));
}

#[test]
fn test_version_output() {
    mirror_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("mirror"));
}

// ============================================================================
// Argument Errors
// ============================================================================

#[test]
fn test_bad_interval_exits_one() {
    let fixture = MirrorFixture::new();
    let mut args = positional(&fixture);
    args[3] = "5 minutes".to_string();

    mirror_cmd()
        .args(&args)
        .arg("--once")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error"))
        .stderr(predicate::str::contains("HH:MM:SS"));
}

#[test]
fn test_non_txt_log_file_exits_one() {
    let fixture = MirrorFixture::new();
    let mut args = positional(&fixture);
    args[2] = fixture.root().join("mirror.json").display().to_string();

    mirror_cmd()
        .args(&args)
        .arg("--once")
        .assert()
        .code(1)
        .stderr(predicate::str::contains(".txt file"));

    assert!(!fixture.replica().exists());
}

#[test]
fn test_nested_replica_exits_one() {
    let fixture = MirrorFixture::new();
    let mut args = positional(&fixture);
    args[1] = fixture.source().join("backup").display().to_string();

    mirror_cmd()
        .args(&args)
        .args(["--once", "--on-collision", "overwrite"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("must not contain each other"));
}

#[test]
fn test_missing_arguments_exit_one() {
    mirror_cmd()
        .arg("only-source")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("missing replica"));
}

#[test]
fn test_missing_source_exits_one() {
    let fixture = MirrorFixture::new();
    let mut args = positional(&fixture);
    args[0] = fixture.root().join("nope").display().to_string();

    mirror_cmd().args(&args).arg("--once").assert().code(1);
}

#[test]
fn test_unknown_policy_is_rejected() {
    let fixture = MirrorFixture::new();

    mirror_cmd()
        .args(positional(&fixture))
        .args(["--on-collision", "merge"])
        .assert()
        .failure();
}

// ============================================================================
// Mirroring
// ============================================================================

#[test]
fn test_once_mirrors_tree_and_writes_log() {
    let fixture = MirrorFixture::new();
    fixture.write_source("a.txt", "alpha");
    fixture.write_source("sub/b.txt", "beta");

    mirror_cmd()
        .args(positional(&fixture))
        .args(["--once", "--on-collision", "overwrite"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Copy of "))
        .stdout(predicate::str::contains("Creation of "));

    fixture.assert_converged();
    let log = fs::read_to_string(fixture.log_file()).unwrap();
    assert_eq!(log.lines().count(), 3);
}

#[test]
fn test_quiet_keeps_stdout_clean() {
    let fixture = MirrorFixture::new();
    fixture.write_source("a.txt", "alpha");

    mirror_cmd()
        .args(positional(&fixture))
        .args(["--once", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    fixture.assert_converged();
}

#[test]
fn test_piped_prompt_answers_collision() {
    let fixture = MirrorFixture::new();
    fixture.write_source("a.txt", "new");
    fixture.write_replica("a.txt", "old");

    mirror_cmd()
        .args(positional(&fixture))
        .arg("--once")
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Do you want to replace it? (y/n)"));

    assert_eq!(fixture.read_replica("a.txt"), "old");
}

#[test]
fn test_config_file_supplies_settings() {
    let fixture = MirrorFixture::new();
    fixture.write_source("a.txt", "alpha");
    fixture.write_replica("a.txt", "stale");
    let config = fixture.root().join("mirror.yaml");
    fs::write(
        &config,
        format!(
            "source: {}\nreplica: {}\nlog_file: {}\ninterval: \"00:00:05\"\non_collision: overwrite\n",
            fixture.source().display(),
            fixture.replica().display(),
            fixture.log_file().display(),
        ),
    )
    .unwrap();

    mirror_cmd()
        .arg("--config")
        .arg(&config)
        .args(["--once", "--quiet"])
        .assert()
        .success();

    assert_eq!(fixture.read_replica("a.txt"), "alpha");
}
