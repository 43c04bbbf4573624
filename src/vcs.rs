//! # Version Control Capability
//!
//! The installer and the update checker never call `git` directly. They go
//! through [`VcsClient`], which names every operation they need and takes the
//! directory to act on as an argument. [`GitCli`] is the implementation used
//! by the binary; tests substitute recording fakes.

use std::path::Path;

use crate::error::Result;
use crate::git;

/// Trait for version-control operations - allows mocking in tests
pub trait VcsClient: Send + Sync {
    /// Clone `source` into `target`, including submodules when `recursive`.
    fn clone_repo(&self, source: &str, target: &Path, recursive: bool) -> Result<()>;

    /// Check out a branch or commit in `dir`.
    fn checkout(&self, dir: &Path, reference: &str) -> Result<()>;

    /// The branch (or detached commit) currently checked out in `dir`.
    fn current_ref(&self, dir: &Path) -> Result<String>;

    /// Refresh remote-tracking branches without touching the work tree.
    fn fetch_remote(&self, dir: &Path) -> Result<()>;

    /// Porcelain v2 status text including the branch header lines.
    fn status_porcelain_with_branch(&self, dir: &Path) -> Result<String>;

    fn pull(&self, dir: &Path) -> Result<()>;

    fn submodule_status(&self, dir: &Path) -> Result<String>;

    fn submodule_update(&self, dir: &Path) -> Result<()>;
}

/// The default implementation of `VcsClient`, which shells out to the system
/// `git` binary.
#[derive(Debug, Default, Clone, Copy)]
pub struct GitCli;

impl VcsClient for GitCli {
    fn clone_repo(&self, source: &str, target: &Path, recursive: bool) -> Result<()> {
        git::clone(source, target, recursive)
    }

    fn checkout(&self, dir: &Path, reference: &str) -> Result<()> {
        git::checkout(dir, reference)
    }

    fn current_ref(&self, dir: &Path) -> Result<String> {
        git::current_ref(dir)
    }

    fn fetch_remote(&self, dir: &Path) -> Result<()> {
        git::remote_update(dir)
    }

    fn status_porcelain_with_branch(&self, dir: &Path) -> Result<String> {
        git::status_porcelain_branch(dir)
    }

    fn pull(&self, dir: &Path) -> Result<()> {
        git::pull(dir)
    }

    fn submodule_status(&self, dir: &Path) -> Result<String> {
        git::submodule_status(dir)
    }

    fn submodule_update(&self, dir: &Path) -> Result<()> {
        git::submodule_update(dir)
    }
}
