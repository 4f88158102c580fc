//! Argument-surface tests for the cfn-policy-forge binary.
//!
//! These exercise input validation only; nothing here reaches AWS.

use assert_cmd::Command;
use predicates::prelude::*;

fn forge() -> Command {
    Command::cargo_bin("cfn-policy-forge").expect("binary builds")
}

#[test]
fn test_missing_both_inputs_is_usage_error() {
    forge()
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("required"));
}

#[test]
fn test_both_inputs_is_usage_error() {
    forge()
        .args([
            "--input-path",
            "templates/",
            "--input-resource-type-list",
            "AWS::IAM::Role",
        ])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn test_nonexistent_input_path_fails_without_output() {
    forge()
        .args(["--input-path", "definitely/not/a/real/path.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_help_lists_input_flags() {
    forge()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--input-path"))
        .stdout(predicate::str::contains("--input-resource-type-list"))
        .stdout(predicate::str::contains("--output-folderpath"));
}

#[test]
fn test_version_flag() {
    forge()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("cfn-policy-forge"));
}

#[test]
fn test_short_version_flag_is_lowercase_v() {
    forge()
        .arg("-v")
        .assert()
        .success()
        .stdout(predicate::str::contains("cfn-policy-forge"));
}

#[test]
fn test_short_flags_are_accepted() {
    // Short forms parse, -V selecting verbose output; the nonexistent
    // path still fails downstream.
    forge()
        .args(["-i", "definitely/not/a/real/path.yaml", "-V"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}
