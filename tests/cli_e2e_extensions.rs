//! End-to-end tests for the `chassis extensions` commands.

#[allow(dead_code)]
mod common;
use common::prelude::*;

use std::process::Command as StdCommand;

#[test]
fn test_list_sorted_without_global_sentinel() {
    let fixture = TestFixture::new()
        .with_config(configs::MINIMAL)
        .with_extension("nodejs", None)
        .with_extension("mailhog", Some("version: 2\n"))
        .with_extension("_global/sequelpro", None);

    fixture
        .command()
        .args(["extensions", "list"])
        .assert()
        .success()
        .stdout("mailhog\nnodejs\n");
}

#[test]
fn test_list_version_filter() {
    let fixture = TestFixture::new()
        .with_extension("nodejs", None)
        .with_extension("mailhog", Some("version: 2\n"));

    fixture
        .command()
        .args(["extensions", "list", "--version", "2"])
        .assert()
        .success()
        .stdout("mailhog\n");
}

#[test]
fn test_list_global_hides_local_names() {
    let fixture = TestFixture::new()
        .with_extension("nodejs", None)
        .with_extension("_global/nodejs", None)
        .with_extension("_global/sequelpro", None);

    fixture
        .command()
        .args(["extensions", "list", "--global"])
        .assert()
        .success()
        .stdout("sequelpro\n");
}

#[test]
fn test_list_empty_project() {
    TestFixture::new()
        .command()
        .args(["extensions", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No extensions installed."));
}

#[test]
fn test_install_declared_already_present() {
    let fixture = TestFixture::new()
        .with_config(configs::WITH_EXTENSIONS)
        .with_extension("nodejs", None);

    fixture
        .command()
        .args(["extensions", "install"])
        .assert()
        .success()
        .stdout(predicate::str::contains("All declared extensions are installed."));
}

#[test]
fn test_install_requires_valid_config() {
    let fixture = TestFixture::new().with_config(configs::NO_PREFIX);

    fixture
        .command()
        .args(["extensions", "install", "nodejs"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("database.prefix"));
}

fn git(dir: &std::path::Path, args: &[&str]) {
    let status = StdCommand::new("git")
        .args(["-c", "user.name=Test", "-c", "user.email=test@example.com"])
        .args(args)
        .current_dir(dir)
        .status()
        .expect("git should run");
    assert!(status.success(), "git {:?} failed", args);
}

#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_install_clones_local_repository() {
    let upstream = TempDir::new().unwrap();
    git(upstream.path(), &["init", "--initial-branch=master"]);
    upstream.child("README.md").write_str("extension").unwrap();
    git(upstream.path(), &["add", "."]);
    git(upstream.path(), &["commit", "-m", "initial"]);

    let source = format!("file://{}/Mail-Hog.git", upstream.path().display());
    let bare_parent = upstream.path().to_path_buf();
    git(
        &bare_parent,
        &["clone", "--bare", ".", "Mail-Hog.git"],
    );

    let fixture = TestFixture::new().with_config(configs::WITH_EXTENSIONS);
    fixture
        .command()
        .args(["extensions", "install", &source])
        .assert()
        .success()
        .stdout(predicate::str::contains("extensions/mail_hog"));

    fixture
        .child("extensions/mail_hog/README.md")
        .assert(predicate::path::exists());

    // Second install is a no-op
    fixture
        .command()
        .args(["extensions", "install", &source])
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_install_failure_exits_non_zero() {
    let fixture = TestFixture::new().with_config(configs::WITH_EXTENSIONS);
    let missing = format!("file://{}/missing.git", fixture.path().display());

    fixture
        .command()
        .args(["extensions", "install", &missing])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not install"));
}
