//! Blocking invocations of the system `git` binary.
//!
//! Every function takes the directory to run in explicitly; nothing here
//! changes the process working directory. Using the system binary means SSH
//! keys, credential helpers and tokens configured for the user's own git
//! work unchanged.

use std::fs;
use std::path::Path;
use std::process::Command;
use std::sync::LazyLock;

use log::debug;
use regex::Regex;

use crate::error::{Error, Result};
use crate::suggestions;

static BRANCH_AB: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^# branch\.ab \+(\d+) -(\d+)$").expect("valid regex")
});

/// Commits the local branch has that upstream lacks, and vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AheadBehind {
    pub ahead: u32,
    pub behind: u32,
}

/// Clone `url` into `target`, fetching submodules when `recursive` is set.
///
/// The parent of `target` is created if needed. `target` itself must not
/// exist or must be empty.
pub fn clone(url: &str, target: &Path, recursive: bool) -> Result<()> {
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut command = Command::new("git");
    command.arg("clone").arg(url).arg(target);
    if recursive {
        command.arg("--recursive");
    }
    debug!("git clone {} {}", url, target.display());

    let output = command.output().map_err(|e| Error::GitClone {
        url: url.to_string(),
        target: target.to_path_buf(),
        message: e.to_string(),
        hint: Some("Make sure git is installed and on your PATH".to_string()),
    })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(Error::GitClone {
            url: url.to_string(),
            target: target.to_path_buf(),
            hint: suggestions::clone_failure(&stderr),
            message: stderr,
        });
    }

    Ok(())
}

/// `git checkout <reference>`
pub fn checkout(dir: &Path, reference: &str) -> Result<()> {
    run(dir, &["checkout", reference]).map(|_| ())
}

/// The branch checked out in `dir`, or the commit when HEAD is detached.
pub fn current_ref(dir: &Path) -> Result<String> {
    let branch = run(dir, &["rev-parse", "--abbrev-ref", "HEAD"])?;
    let branch = branch.trim();
    if branch != "HEAD" {
        return Ok(branch.to_string());
    }
    Ok(run(dir, &["rev-parse", "HEAD"])?.trim().to_string())
}

/// `git remote update`, refreshing every remote-tracking branch.
pub fn remote_update(dir: &Path) -> Result<()> {
    run(dir, &["remote", "update"]).map(|_| ())
}

/// Machine-readable status including the `# branch.*` header lines.
pub fn status_porcelain_branch(dir: &Path) -> Result<String> {
    run(dir, &["status", "--porcelain=2", "--branch"])
}

/// `git pull`
pub fn pull(dir: &Path) -> Result<()> {
    run(dir, &["pull"]).map(|_| ())
}

/// `git submodule status`
pub fn submodule_status(dir: &Path) -> Result<String> {
    run(dir, &["submodule", "status"])
}

/// `git submodule update`
pub fn submodule_update(dir: &Path) -> Result<()> {
    run(dir, &["submodule", "update"]).map(|_| ())
}

/// Extract the ahead/behind counts from `git status --porcelain=2 --branch`.
///
/// Returns `None` when there is no upstream, since git then omits the line.
pub fn parse_branch_ab(status: &str) -> Option<AheadBehind> {
    let captures = BRANCH_AB.captures(status)?;
    Some(AheadBehind {
        ahead: captures[1].parse().ok()?,
        behind: captures[2].parse().ok()?,
    })
}

/// Whether `git submodule status` lists a submodule whose checked-out
/// commit differs from the one recorded in the superproject.
pub fn submodules_out_of_date(status: &str) -> bool {
    status.lines().any(|line| line.starts_with('+'))
}

fn run(dir: &Path, args: &[&str]) -> Result<String> {
    let command = args.join(" ");
    debug!("git {} (in {})", command, dir.display());

    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .map_err(|e| Error::GitCommand {
            command: command.clone(),
            dir: dir.to_path_buf(),
            stderr: e.to_string(),
        })?;

    if !output.status.success() {
        return Err(Error::GitCommand {
            command,
            dir: dir.to_path_buf(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
