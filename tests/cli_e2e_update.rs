//! End-to-end tests for the `chassis update` command.
//!
//! Tests that create real repositories need a `git` binary and are gated
//! behind the `integration-tests` feature.

#[allow(dead_code)]
mod common;
use common::prelude::*;

use std::path::Path;
use std::process::Command as StdCommand;

fn git(dir: &Path, args: &[&str]) -> String {
    let output = StdCommand::new("git")
        .args(["-c", "user.name=Test", "-c", "user.email=test@example.com"])
        .args(args)
        .current_dir(dir)
        .output()
        .expect("git should run");
    assert!(output.status.success(), "git {:?} failed", args);
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

#[test]
fn test_update_help() {
    cargo_bin_cmd!("chassis")
        .args(["update", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--yes"))
        .stdout(predicate::str::contains("--check"))
        .stdout(predicate::str::contains("--force"));
}

#[test]
fn test_update_disabled_does_nothing() {
    let fixture = TestFixture::new().with_config(configs::MINIMAL);

    fixture
        .command()
        .env("HOME", fixture.path())
        .args(["update", "--check"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Checking").not())
        .stdout(predicate::str::contains("Everything is up to date."));
}

#[test]
fn test_update_missing_prefix_is_fatal() {
    let fixture = TestFixture::new().with_config(configs::NO_PREFIX);

    fixture
        .command()
        .arg("update")
        .assert()
        .failure()
        .stderr(predicate::str::contains("database.prefix"));
}

#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_stale_core_is_reported_and_branch_restored() {
    let temp = TempDir::new().unwrap();
    let upstream = temp.child("upstream");
    upstream.create_dir_all().unwrap();
    git(upstream.path(), &["init", "--initial-branch=master"]);
    upstream.child("config.yaml").write_str(configs::MINIMAL).unwrap();
    git(upstream.path(), &["add", "."]);
    git(upstream.path(), &["commit", "-m", "initial"]);

    git(temp.path(), &["clone", "upstream", "project"]);
    let project = temp.child("project");
    git(project.path(), &["checkout", "-b", "feature"]);

    upstream.child("README.md").write_str("new").unwrap();
    git(upstream.path(), &["add", "."]);
    git(upstream.path(), &["commit", "-m", "second"]);

    cargo_bin_cmd!("chassis")
        .env("HOME", temp.path())
        .env("NO_COLOR", "1")
        .arg("--root")
        .arg(project.path())
        .args(["update", "--check", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("core is 1 commit(s) behind"));

    assert_eq!(
        git(project.path(), &["rev-parse", "--abbrev-ref", "HEAD"]),
        "feature"
    );
}

#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_update_yes_pulls_stale_core() {
    let temp = TempDir::new().unwrap();
    let upstream = temp.child("upstream");
    upstream.create_dir_all().unwrap();
    git(upstream.path(), &["init", "--initial-branch=master"]);
    upstream
        .child("config.yaml")
        .write_str(&format!("{}auto_update:\n  core: true\n", configs::MINIMAL))
        .unwrap();
    git(upstream.path(), &["add", "."]);
    git(upstream.path(), &["commit", "-m", "initial"]);

    git(temp.path(), &["clone", "upstream", "project"]);
    let project = temp.child("project");

    upstream.child("README.md").write_str("new").unwrap();
    git(upstream.path(), &["add", "."]);
    git(upstream.path(), &["commit", "-m", "second"]);

    cargo_bin_cmd!("chassis")
        .env("HOME", temp.path())
        .env("NO_COLOR", "1")
        .arg("--root")
        .arg(project.path())
        .args(["update", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("core is now up to date."));

    project.child("README.md").assert(predicate::path::exists());
}
