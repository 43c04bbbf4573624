//! # Updates
//!
//! Chassis core, its submodules and every extension are git checkouts that
//! can fall behind upstream. Before provisioning, the components enabled in
//! `auto_update` are checked and the user is offered an update:
//!
//! - [`checker::UpdateChecker`] finds stale components without changing what
//!   is checked out;
//! - [`coordinator::UpdateCoordinator`] asks for confirmation and pulls;
//! - [`AutoUpdater`] runs both for core, submodules, project extensions and
//!   per-user global extensions, in that order.
//!
//! Nothing in this module is fatal to provisioning. Failed checks count as
//! up to date and failed pulls are reported and skipped.

pub mod checker;
pub mod coordinator;

use std::fmt;
use std::path::PathBuf;

use log::debug;

use crate::config::AutoUpdate;
use crate::defaults;
use crate::error::{Error, Result};
use crate::extension::ExtensionRegistry;
use crate::layout::Layout;
use crate::output::{Prompt, Reporter};
use crate::vcs::VcsClient;

pub use checker::UpdateChecker;
pub use coordinator::{prompt_message, UpdateCoordinator, UpdateOutcome};

/// A component whose main branch is behind upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateRecord {
    pub component: String,
    pub directory: PathBuf,
    pub behind: u32,
}

/// Which kind of component an update prompt is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateContext {
    Core,
    Extensions,
    Submodules,
}

impl fmt::Display for UpdateContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UpdateContext::Core => "core",
            UpdateContext::Extensions => "extensions",
            UpdateContext::Submodules => "submodules",
        };
        f.write_str(name)
    }
}

/// How [`AutoUpdater::run`] behaves.
#[derive(Debug, Clone, Copy, Default)]
pub struct UpdateOptions {
    /// Check every component regardless of `auto_update`.
    pub force: bool,
    /// Only look for stale components; never prompt or pull.
    pub check_only: bool,
}

/// Everything one [`AutoUpdater::run`] found and did.
#[derive(Debug, Default)]
pub struct UpdateRun {
    /// Stale components, in the order they were checked.
    pub stale: Vec<UpdateRecord>,
    /// Whether any submodule was out of date.
    pub submodules_stale: bool,
    /// Components that were updated.
    pub updated: Vec<String>,
    /// Components whose update failed.
    pub failed: Vec<(String, Error)>,
}

impl UpdateRun {
    fn absorb(&mut self, outcome: UpdateOutcome) {
        if let UpdateOutcome::Applied { updated, failed } = outcome {
            self.updated.extend(updated);
            self.failed.extend(failed);
        }
    }
}

/// Runs the update checks enabled in a project's `auto_update` settings.
pub struct AutoUpdater<'a> {
    layout: &'a Layout,
    registry: &'a ExtensionRegistry,
    vcs: &'a dyn VcsClient,
    prompt: &'a dyn Prompt,
    reporter: &'a dyn Reporter,
}

impl<'a> AutoUpdater<'a> {
    pub fn new(
        layout: &'a Layout,
        registry: &'a ExtensionRegistry,
        vcs: &'a dyn VcsClient,
        prompt: &'a dyn Prompt,
        reporter: &'a dyn Reporter,
    ) -> Self {
        Self {
            layout,
            registry,
            vcs,
            prompt,
            reporter,
        }
    }

    /// Check core, submodules, project extensions and global extensions.
    ///
    /// Only prompt errors are returned; everything else is recorded in the
    /// returned [`UpdateRun`].
    pub fn run(&self, flags: &AutoUpdate, options: UpdateOptions) -> Result<UpdateRun> {
        let checker = UpdateChecker::new(self.vcs);
        let coordinator = UpdateCoordinator::new(self.vcs, self.prompt, self.reporter);
        let root = self.layout.root();
        let mut run = UpdateRun::default();

        if flags.core || options.force {
            self.reporter.report("Checking for Chassis core updates...");
            let records =
                checker.check_components(&[defaults::CORE_COMPONENT.to_string()], root);
            run.stale.extend(records.iter().cloned());
            if !options.check_only && !records.is_empty() {
                run.absorb(coordinator.offer(UpdateContext::Core, &records)?);
            }
        }

        if flags.submodules || options.force {
            self.reporter
                .report("Checking for Chassis submodule updates...");
            run.submodules_stale = checker.check_submodules(root);
            if !options.check_only {
                run.absorb(coordinator.offer_submodules(root, run.submodules_stale)?);
            }
        }

        if flags.extensions || options.force {
            self.reporter
                .report("Checking for Chassis extension updates...");
            let dir = self.registry.local_dir().to_path_buf();
            self.check_extensions(&checker, &coordinator, &dir, options, &mut run)?;
        }

        if flags.global_extensions || options.force {
            match self.layout.user_extensions_dir() {
                Some(dir) => {
                    self.reporter
                        .report("Checking for Chassis global extension updates...");
                    let dir = dir.to_path_buf();
                    self.check_extensions(&checker, &coordinator, &dir, options, &mut run)?;
                }
                None => debug!("No home directory; skipping global extension updates"),
            }
        }

        Ok(run)
    }

    fn check_extensions(
        &self,
        checker: &UpdateChecker<'_>,
        coordinator: &UpdateCoordinator<'_>,
        dir: &std::path::Path,
        options: UpdateOptions,
        run: &mut UpdateRun,
    ) -> Result<()> {
        let names = match self.registry.list(dir, None) {
            Ok(names) => names,
            Err(e) => {
                self.reporter
                    .warn(&format!("Could not list extensions in {}: {}", dir.display(), e));
                return Ok(());
            }
        };

        let records = checker.check_components(&names, dir);
        run.stale.extend(records.iter().cloned());
        if !options.check_only {
            run.absorb(coordinator.offer(UpdateContext::Extensions, &records)?);
        }
        Ok(())
    }
}
