//! Cloning of extensions and their declared dependencies.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::config::Configuration;
use crate::defaults;
use crate::error::{Error, Result};
use crate::extension::{folder_name, ExtensionRegistry, ExtensionSource};
use crate::output::Reporter;
use crate::suggestions;
use crate::vcs::VcsClient;

/// What [`ExtensionInstaller::install`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    /// The extension was cloned into the named folder.
    Installed(String),
    /// The folder already existed; nothing was cloned.
    AlreadyPresent(String),
}

/// A legacy hyphenated folder removed so it can be reinstalled with
/// underscores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rename {
    pub from: String,
    pub to: String,
}

/// Result of [`ExtensionInstaller::install_declared`].
#[derive(Debug, Default)]
pub struct InstallSummary {
    /// Identifiers that were cloned.
    pub installed: Vec<String>,
    /// Identifiers whose folder already existed.
    pub already_present: Vec<String>,
    /// Identifiers that could not be installed, with the reason.
    pub failed: Vec<(String, Error)>,
    /// Legacy folders removed before installing.
    pub renamed: Vec<Rename>,
}

impl InstallSummary {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Installs extensions into the project's `extensions/` directory.
pub struct ExtensionInstaller<'a> {
    registry: &'a ExtensionRegistry,
    vcs: &'a dyn VcsClient,
    reporter: &'a dyn Reporter,
}

impl<'a> ExtensionInstaller<'a> {
    pub fn new(
        registry: &'a ExtensionRegistry,
        vcs: &'a dyn VcsClient,
        reporter: &'a dyn Reporter,
    ) -> Self {
        Self {
            registry,
            vcs,
            reporter,
        }
    }

    /// Directory extensions are cloned into.
    pub fn extensions_dir(&self) -> &Path {
        self.registry.local_dir()
    }

    /// Install one extension.
    ///
    /// Does nothing if the target folder already exists. From schema
    /// version 3, hyphenated folders left by older versions are removed
    /// first (see [`migrate_legacy_names`](Self::migrate_legacy_names)).
    pub fn install(&self, identifier: &str, schema_version: u32) -> Result<InstallOutcome> {
        self.install_migrating(identifier, schema_version)
            .map(|(outcome, _)| outcome)
    }

    fn install_migrating(
        &self,
        identifier: &str,
        schema_version: u32,
    ) -> Result<(InstallOutcome, Vec<Rename>)> {
        let location = ExtensionSource::classify(identifier).location();

        let renames = if schema_version >= defaults::UNDERSCORE_NAMING_VERSION {
            self.migrate_legacy_names()?
        } else {
            Vec::new()
        };

        let folder = folder_name(&location, schema_version);
        let target = self.extensions_dir().join(&folder);
        if target.exists() {
            debug!("{} already installed at {}", identifier, target.display());
            return Ok((InstallOutcome::AlreadyPresent(folder), renames));
        }

        info!("Installing {} from {}", identifier, location);
        self.reporter
            .report(&format!("Installing {} from {}...", folder, location));
        self.vcs.clone_repo(&location, &target, true)?;
        self.registry.invalidate(self.extensions_dir())?;

        Ok((InstallOutcome::Installed(folder), renames))
    }

    /// Remove every extension folder whose name contains a hyphen.
    ///
    /// Hyphens are not allowed in extension names from schema version 3, so
    /// these folders are deleted and reinstalled under the underscore
    /// spelling by the next [`install`](Self::install). Each removal is
    /// reported as `- old to new`.
    pub fn migrate_legacy_names(&self) -> Result<Vec<Rename>> {
        let dir = self.extensions_dir();
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(Error::Io(e)),
        };

        let mut legacy: Vec<PathBuf> = Vec::new();
        for entry in entries {
            let entry = entry?;
            if entry.file_type()?.is_dir() && entry.file_name().to_string_lossy().contains('-') {
                legacy.push(entry.path());
            }
        }
        legacy.sort();

        let mut renames = Vec::with_capacity(legacy.len());
        for path in legacy {
            fs::remove_dir_all(&path)?;
            let from = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            renames.push(Rename {
                to: from.replace('-', "_"),
                from,
            });
        }

        if !renames.is_empty() {
            self.registry.invalidate(dir)?;
            self.reporter
                .warn("We're renaming the following extensions:");
            for rename in &renames {
                self.reporter
                    .report(&format!("- {} to {}", rename.from, rename.to));
            }
        }

        Ok(renames)
    }

    /// Install everything `config` asks for.
    ///
    /// First every identifier in `extensions`, then the dependencies
    /// declared by installed extensions whose own schema version is 2.
    /// Dependencies of those dependencies are not followed. A failure is
    /// reported and recorded, and the remaining identifiers are still
    /// attempted.
    pub fn install_declared(&self, config: &Configuration) -> Result<InstallSummary> {
        let version = config.schema_version;
        let mut summary = InstallSummary::default();

        if version >= defaults::UNDERSCORE_NAMING_VERSION {
            for identifier in &config.extensions {
                if let Some(replacement) = suggestions::underscore_identifier(identifier) {
                    self.reporter.warn(&format!(
                        "Please change {} to {} in your yaml configuration file.",
                        identifier, replacement
                    ));
                }
            }
        }

        for identifier in &config.extensions {
            self.install_into(&mut summary, identifier, version);
        }

        let dir = self.extensions_dir().to_path_buf();
        for name in self
            .registry
            .list(&dir, Some(defaults::DEPENDENCY_SCHEMA_VERSION))?
        {
            let extension = self.registry.extension_config(&name, &dir)?;
            for dependency in &extension.dependencies {
                self.install_into(&mut summary, dependency, version);
            }
        }

        Ok(summary)
    }

    fn install_into(&self, summary: &mut InstallSummary, identifier: &str, version: u32) {
        let seen = summary
            .installed
            .iter()
            .chain(&summary.already_present)
            .chain(summary.failed.iter().map(|(id, _)| id))
            .any(|id| id == identifier);
        if seen {
            return;
        }

        match self.install_migrating(identifier, version) {
            Ok((outcome, renames)) => {
                summary.renamed.extend(renames);
                match outcome {
                    InstallOutcome::Installed(_) => summary.installed.push(identifier.to_string()),
                    InstallOutcome::AlreadyPresent(_) => {
                        summary.already_present.push(identifier.to_string())
                    }
                }
            }
            Err(e) => {
                warn!("Installing {} failed: {:?}", identifier, e);
                self.reporter
                    .warn(&format!("Could not install {}: {}", identifier, e));
                summary.failed.push((identifier.to_string(), e));
            }
        }
    }
}
