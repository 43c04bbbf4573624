//! Asking the user about stale components and updating them.

use std::path::Path;

use log::info;

use crate::defaults;
use crate::error::{Error, Result};
use crate::output::{Prompt, Reporter};
use crate::update::{UpdateContext, UpdateRecord};
use crate::vcs::VcsClient;

/// What happened to an offered update.
#[derive(Debug)]
pub enum UpdateOutcome {
    /// Nothing was stale, so nothing was asked.
    UpToDate,
    /// The user said no.
    Declined,
    /// Updates were attempted.
    Applied {
        updated: Vec<String>,
        failed: Vec<(String, Error)>,
    },
}

/// The question asked for `context` and the stale `records`.
pub fn prompt_message(context: UpdateContext, records: &[UpdateRecord]) -> String {
    match context {
        UpdateContext::Core => "Chassis core appears to be out of date. This may cause \
             provisioning to fail! Would you like to update it now?"
            .to_string(),
        UpdateContext::Extensions => {
            let wording = if records.len() > 1 {
                "extensions appear"
            } else {
                "extension appears"
            };
            let names: Vec<&str> = records.iter().map(|r| r.component.as_str()).collect();
            format!(
                "The following Chassis {} to be out of date: {}. This may cause \
                 provisioning to fail! Would you like to update them now?",
                wording,
                names.join(", ")
            )
        }
        UpdateContext::Submodules => "The Chassis submodules appear to be out of date. This \
             may cause provisioning to fail! Would you like to update them now?"
            .to_string(),
    }
}

/// Offers updates and applies the ones the user accepts.
pub struct UpdateCoordinator<'a> {
    vcs: &'a dyn VcsClient,
    prompt: &'a dyn Prompt,
    reporter: &'a dyn Reporter,
}

impl<'a> UpdateCoordinator<'a> {
    pub fn new(
        vcs: &'a dyn VcsClient,
        prompt: &'a dyn Prompt,
        reporter: &'a dyn Reporter,
    ) -> Self {
        Self {
            vcs,
            prompt,
            reporter,
        }
    }

    /// Ask whether to update `records` and, if confirmed, update them.
    pub fn offer(&self, context: UpdateContext, records: &[UpdateRecord]) -> Result<UpdateOutcome> {
        if records.is_empty() {
            if context == UpdateContext::Extensions {
                self.reporter.success("All your extensions are up to date!");
            }
            return Ok(UpdateOutcome::UpToDate);
        }

        if !self.prompt.confirm(&prompt_message(context, records))? {
            return Ok(UpdateOutcome::Declined);
        }

        Ok(self.apply(records))
    }

    /// Check out the main branch and pull in every record's directory.
    ///
    /// Each component is attempted even if an earlier one failed.
    pub fn apply(&self, records: &[UpdateRecord]) -> UpdateOutcome {
        let mut updated = Vec::new();
        let mut failed = Vec::new();

        for record in records {
            self.reporter
                .report(&format!("Updating {}...", record.component));
            match self.update_one(&record.directory) {
                Ok(()) => {
                    info!("Updated {} in {}", record.component, record.directory.display());
                    self.reporter
                        .success(&format!("{} is now up to date.", record.component));
                    updated.push(record.component.clone());
                }
                Err(e) => {
                    self.reporter
                        .warn(&format!("Could not update {}: {}", record.component, e));
                    failed.push((record.component.clone(), e));
                }
            }
        }

        UpdateOutcome::Applied { updated, failed }
    }

    /// Ask whether to update the submodules of the repository in `dir`.
    pub fn offer_submodules(&self, dir: &Path, out_of_date: bool) -> Result<UpdateOutcome> {
        if !out_of_date {
            return Ok(UpdateOutcome::UpToDate);
        }
        if !self
            .prompt
            .confirm(&prompt_message(UpdateContext::Submodules, &[]))?
        {
            return Ok(UpdateOutcome::Declined);
        }

        let component = UpdateContext::Submodules.to_string();
        Ok(match self.vcs.submodule_update(dir) {
            Ok(()) => {
                self.reporter.success("All your submodules are up to date!");
                UpdateOutcome::Applied {
                    updated: vec![component],
                    failed: Vec::new(),
                }
            }
            Err(e) => {
                self.reporter
                    .warn(&format!("Could not update submodules: {}", e));
                UpdateOutcome::Applied {
                    updated: Vec::new(),
                    failed: vec![(component, e)],
                }
            }
        })
    }

    fn update_one(&self, dir: &Path) -> Result<()> {
        self.vcs.checkout(dir, defaults::MAIN_BRANCH)?;
        self.vcs.pull(dir)
    }
}
