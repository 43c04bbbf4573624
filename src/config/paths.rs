//! Derivation of mount mappings from a merged configuration.
//!
//! The provisioned machine sees the project root at `/vagrant`. Anything the
//! configuration points at outside that tree has to be attached as its own
//! synced folder under `/chassis`. [`PathNormalizer`] works out which case
//! applies to `paths.base`, `paths.wp` and `paths.content` and records the
//! in-guest location of each in `mapped_paths`.

use std::path::{Path, PathBuf};

use log::debug;

use crate::config::schema::{Configuration, PathSetting};
use crate::defaults;
use crate::error::{Error, Result};
use crate::output::Reporter;
use crate::path;
use crate::suggestions;

/// Rewrites a configuration so every path is absolute and mapped.
pub struct PathNormalizer<'a> {
    root: PathBuf,
    reporter: &'a dyn Reporter,
}

impl<'a> PathNormalizer<'a> {
    /// `root` is the project root relative paths are resolved against. A
    /// relative root is taken from the current directory.
    pub fn new(root: impl Into<PathBuf>, reporter: &'a dyn Reporter) -> Self {
        let root = root.into();
        let root = match std::env::current_dir() {
            Ok(cwd) if root.is_relative() => cwd.join(root),
            _ => root,
        };
        Self {
            root: path::clean(&root),
            reporter,
        }
    }

    /// Return a normalized copy of `config`.
    ///
    /// The input is left untouched. Only an unusable `paths.base` fails;
    /// problems with `wp` and `content` fall back to defaults with a warning.
    /// Applying this to its own output yields the same mappings.
    pub fn normalize(&self, config: &Configuration) -> Result<Configuration> {
        let mut config = config.clone();

        if let Some(wpdir) = &config.wpdir {
            self.reporter
                .warn("wpdir is deprecated, use paths.wp instead");
            config.paths.wp = Some(wpdir.clone());
        }

        self.check_hosts(&config.hosts);

        let base = config
            .paths
            .base()
            .map(|base| path::expand(base, &self.root))
            .ok_or_else(|| Error::InvalidConfig {
                field: "paths.base".to_string(),
                message: format!("{} ({})", describe(config.paths.base.as_ref()), suggestions::paths_base()),
            })?;

        config.mapped_paths.clear();

        let base_mapping = match path::relative_to(&base, &self.root) {
            Some(relative) => path::guest_join(defaults::GUEST_PROJECT_ROOT, &relative),
            None => {
                config.synced_folders.insert(
                    base.to_string_lossy().into_owned(),
                    defaults::EXTERNAL_MOUNT_TAG.to_string(),
                );
                defaults::EXTERNAL_MOUNT_TAG.to_string()
            }
        };
        debug!("paths.base {} -> {}", base.display(), base_mapping);
        config
            .mapped_paths
            .insert("base".to_string(), base_mapping.clone());

        for name in ["wp", "content"] {
            let setting = match name {
                "wp" => config.paths.wp(),
                _ => config.paths.content(),
            };
            let resolved = match setting {
                Some(value) => path::expand(value, &base),
                None => {
                    let fallback = path::expand(name, &base);
                    self.reporter.warn(&format!(
                        "Missing paths.{} - Defaulting to {}",
                        name,
                        fallback.display()
                    ));
                    fallback
                }
            };

            let mapping = match path::relative_to(&resolved, &base) {
                Some(relative) => path::guest_join(&base_mapping, &relative),
                None => {
                    let tag = format!("{}/{}", defaults::EXTERNAL_MOUNT_TAG, name);
                    config
                        .synced_folders
                        .insert(resolved.to_string_lossy().into_owned(), tag.clone());
                    tag
                }
            };
            debug!("paths.{} {} -> {}", name, resolved.display(), mapping);
            config.mapped_paths.insert(name.to_string(), mapping);

            let resolved = Some(PathSetting::Path(resolved));
            match name {
                "wp" => config.paths.wp = resolved,
                _ => config.paths.content = resolved,
            }
        }

        config.paths.base = Some(PathSetting::Path(base));
        Ok(config)
    }

    /// The project root this normalizer resolves against.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn check_hosts(&self, hosts: &[String]) {
        match hosts.first() {
            Some(host) if host.ends_with(defaults::LOCAL_HOST_SUFFIX) => {}
            Some(host) => self.reporter.warn(&format!(
                "The hosts URL {} does not end in {}. You will need to edit your hosts file for this URL to resolve.",
                host,
                defaults::LOCAL_HOST_SUFFIX
            )),
            None => self.reporter.warn("No hosts are configured."),
        }
    }
}

fn describe(setting: Option<&PathSetting>) -> &'static str {
    match setting {
        None => "missing",
        Some(PathSetting::Path(_)) => "empty",
        Some(PathSetting::Invalid(_)) => "not a path",
    }
}
