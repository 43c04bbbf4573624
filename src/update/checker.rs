//! Staleness checks against upstream.

use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::defaults;
use crate::error::Result;
use crate::git;
use crate::update::UpdateRecord;
use crate::vcs::VcsClient;

/// Works out which components are behind their upstream branch.
///
/// Checks are advisory: a component whose git commands fail is reported as
/// up to date and the failure is only logged.
pub struct UpdateChecker<'a> {
    vcs: &'a dyn VcsClient,
}

impl<'a> UpdateChecker<'a> {
    pub fn new(vcs: &'a dyn VcsClient) -> Self {
        Self { vcs }
    }

    /// Check each named component and return those that are behind, in
    /// input order.
    ///
    /// `core` refers to `base_dir` itself; any other name to
    /// `base_dir/<name>`. The `example` placeholder is skipped. Whatever was
    /// checked out in a component beforehand is checked out again afterwards.
    pub fn check_components(&self, names: &[String], base_dir: &Path) -> Vec<UpdateRecord> {
        let mut records = Vec::new();
        for name in names {
            if name == defaults::EXAMPLE_COMPONENT {
                continue;
            }
            let dir = component_dir(name, base_dir);
            match self.behind_count(&dir) {
                Ok(Some(behind)) => records.push(UpdateRecord {
                    component: name.clone(),
                    directory: dir,
                    behind,
                }),
                Ok(None) => debug!("{} is up to date", name),
                Err(e) => warn!("Skipping update check for {}: {}", name, e),
            }
        }
        records
    }

    /// Whether any submodule of the repository in `dir` is checked out at a
    /// different commit than the one recorded.
    pub fn check_submodules(&self, dir: &Path) -> bool {
        match self.vcs.submodule_status(dir) {
            Ok(status) => git::submodules_out_of_date(&status),
            Err(e) => {
                warn!("Skipping submodule check in {}: {}", dir.display(), e);
                false
            }
        }
    }

    /// Commits `dir`'s main branch is behind upstream, if any.
    fn behind_count(&self, dir: &Path) -> Result<Option<u32>> {
        let _restore = RefGuard::new(self.vcs, dir)?;

        self.vcs.checkout(dir, defaults::MAIN_BRANCH)?;
        self.vcs.fetch_remote(dir)?;
        let status = self.vcs.status_porcelain_with_branch(dir)?;

        Ok(git::parse_branch_ab(&status)
            .map(|ab| ab.behind)
            .filter(|behind| *behind > 0))
    }
}

/// Directory holding component `name`.
pub fn component_dir(name: &str, base_dir: &Path) -> PathBuf {
    if name == defaults::CORE_COMPONENT {
        base_dir.to_path_buf()
    } else {
        base_dir.join(name)
    }
}

/// Checks the recorded ref out again when dropped.
struct RefGuard<'a> {
    vcs: &'a dyn VcsClient,
    dir: &'a Path,
    previous: String,
}

impl<'a> RefGuard<'a> {
    fn new(vcs: &'a dyn VcsClient, dir: &'a Path) -> Result<Self> {
        let previous = vcs.current_ref(dir)?;
        Ok(Self { vcs, dir, previous })
    }
}

impl Drop for RefGuard<'_> {
    fn drop(&mut self) {
        if let Err(e) = self.vcs.checkout(self.dir, &self.previous) {
            warn!(
                "Could not restore {} in {}: {}",
                self.previous,
                self.dir.display(),
                e
            );
        }
    }
}
