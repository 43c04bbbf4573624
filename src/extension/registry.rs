//! Enumeration of installed extensions.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::cache::{CacheKey, ConfigCache};
use crate::defaults;
use crate::document::{DocumentStore, YamlDocumentStore};
use crate::error::{Error, Result};
use crate::extension::ExtensionConfig;
use crate::layout::Layout;

/// Lists the extensions installed in a project and reads their own
/// configuration.
///
/// Local extensions live directly in `extensions/`; project-wide shared
/// extensions live in `extensions/_global/`. A local extension shadows a
/// global one of the same name.
pub struct ExtensionRegistry {
    local_dir: PathBuf,
    global_dir: PathBuf,
    store: Box<dyn DocumentStore>,
    cache: ConfigCache,
}

impl ExtensionRegistry {
    pub fn new(layout: &Layout) -> Self {
        Self {
            local_dir: layout.extensions_dir(),
            global_dir: layout.global_extensions_dir(),
            store: Box::new(YamlDocumentStore),
            cache: ConfigCache::new(),
        }
    }

    /// Create a registry reading extension documents through `store`.
    pub fn with_store(mut self, store: Box<dyn DocumentStore>) -> Self {
        self.store = store;
        self
    }

    /// The local extensions directory.
    pub fn local_dir(&self) -> &Path {
        &self.local_dir
    }

    /// The shared `_global` extensions directory.
    pub fn global_dir(&self) -> &Path {
        &self.global_dir
    }

    /// The cache of extension documents read so far.
    pub fn cache(&self) -> &ConfigCache {
        &self.cache
    }

    /// Names of the extensions in `dir`, sorted.
    ///
    /// Only subdirectories count; the `_global` sentinel and hidden entries
    /// are skipped. With `version`, only extensions whose `chassis.yaml`
    /// declares that version are kept. A missing `dir` lists nothing.
    pub fn list(&self, dir: &Path, version: Option<u32>) -> Result<Vec<String>> {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Extensions directory {} does not exist", dir.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(Error::Io(e)),
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            if name == defaults::GLOBAL_EXTENSIONS_SENTINEL || name.starts_with('.') {
                continue;
            }
            names.push(name);
        }
        names.sort();

        if let Some(version) = version {
            let mut matching = Vec::with_capacity(names.len());
            for name in names {
                if self.extension_config(&name, dir)?.version == version {
                    matching.push(name);
                }
            }
            names = matching;
        }

        Ok(names)
    }

    /// Extensions installed in the project's `extensions/` directory.
    pub fn list_local(&self, version: Option<u32>) -> Result<Vec<String>> {
        self.list(&self.local_dir, version)
    }

    /// Extensions in `extensions/_global/` that are not also installed
    /// locally.
    pub fn list_global(&self, version: Option<u32>) -> Result<Vec<String>> {
        let local = self.list(&self.local_dir, None)?;
        let global = self.list(&self.global_dir, version)?;
        Ok(global
            .into_iter()
            .filter(|name| !local.contains(name))
            .collect())
    }

    /// The `chassis.yaml` of extension `name` inside `base_dir`.
    ///
    /// An extension without the file is a legacy extension (version 1, no
    /// dependencies). A file that cannot be parsed is treated the same way
    /// after logging a warning. Results are cached per name and directory.
    pub fn extension_config(&self, name: &str, base_dir: &Path) -> Result<ExtensionConfig> {
        self.cache.get_or_load(CacheKey::new(name, base_dir), || {
            let path = base_dir.join(name).join(defaults::EXTENSION_CONFIG_FILE);
            let document = match self.store.load(&path) {
                Ok(Some(document)) if !document.is_null() => document,
                Ok(_) => return Ok(ExtensionConfig::default()),
                Err(Error::ConfigSyntax { path, message }) => {
                    warn!(
                        "Ignoring unreadable extension config {}: {}",
                        path.display(),
                        message
                    );
                    return Ok(ExtensionConfig::default());
                }
                Err(e) => return Err(e),
            };

            match serde_yaml::from_value(document) {
                Ok(config) => Ok(config),
                Err(e) => {
                    warn!(
                        "Ignoring invalid extension config {}: {}",
                        path.display(),
                        e
                    );
                    Ok(ExtensionConfig::default())
                }
            }
        })
    }

    /// Forget cached documents for `dir`, after extensions there changed.
    pub fn invalidate(&self, dir: &Path) -> Result<()> {
        self.cache.invalidate_dir(dir)
    }
}
