//! Layered configuration loading.
//!
//! `config.yaml` is read first, then each optional override in
//! [`defaults::OVERRIDE_CONFIG_FILES`] order. Each layer replaces whole
//! top-level keys of the layers before it; nested mappings are not merged.

use std::path::{Path, PathBuf};

use log::debug;
use serde_yaml::{Mapping, Value};

use crate::config::schema::Configuration;
use crate::defaults;
use crate::document::{DocumentStore, YamlDocumentStore};
use crate::error::{Error, Result};
use crate::suggestions;

/// The merged top-level mapping before it is given types.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedDocument {
    pub document: Mapping,
    /// True iff an override layer defined `database.prefix`.
    pub has_custom_prefix: bool,
    /// The files that contributed, in merge order.
    pub layers: Vec<PathBuf>,
}

/// Loads and merges the configuration layers of a project.
pub struct ConfigLoader {
    root: PathBuf,
    store: Box<dyn DocumentStore>,
}

impl ConfigLoader {
    /// Creates a loader reading YAML files beneath `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_store(root, Box::new(YamlDocumentStore))
    }

    /// Creates a loader with a custom `DocumentStore`.
    pub fn with_store(root: impl Into<PathBuf>, store: Box<dyn DocumentStore>) -> Self {
        Self {
            root: root.into(),
            store,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Load, merge and type the configuration.
    ///
    /// Every error returned here is fatal: a syntax error in any layer, a
    /// missing `database.prefix`, or a value the schema cannot coerce.
    pub fn load(&self) -> Result<Configuration> {
        let merged = self.merge()?;

        let mut document = merged.document;
        if let Some(Value::Mapping(database)) = document.get_mut("database") {
            database.insert(
                Value::from("has_custom_prefix"),
                Value::Bool(merged.has_custom_prefix),
            );
        }

        Configuration::from_value(Value::Mapping(document))
    }

    /// Merge the layers without typing them.
    pub fn merge(&self) -> Result<MergedDocument> {
        let base_path = self.root.join(defaults::BASE_CONFIG_FILE);
        let base = self
            .store
            .load(&base_path)?
            .ok_or_else(|| Error::ConfigNotFound {
                path: base_path.clone(),
                hint: Some(suggestions::config_not_found(&self.root)),
            })?;

        let mut document = into_mapping(base);
        let mut layers = vec![base_path];
        let mut has_custom_prefix = false;

        for name in defaults::OVERRIDE_CONFIG_FILES {
            let path = self.root.join(name);
            let Some(layer) = self.store.load(&path)? else {
                continue;
            };
            let Value::Mapping(layer) = layer else {
                debug!("Ignoring {}: not a mapping", path.display());
                continue;
            };

            debug!("Merging configuration layer {}", path.display());
            if defines_prefix(&layer) {
                has_custom_prefix = true;
            }
            for (key, value) in layer {
                document.insert(key, value);
            }
            layers.push(path);
        }

        if !defines_prefix(&document) {
            return Err(Error::MissingConfigKey {
                key: "database.prefix".to_string(),
                hint: Some(suggestions::database_prefix()),
            });
        }

        Ok(MergedDocument {
            document,
            has_custom_prefix,
            layers,
        })
    }
}

fn into_mapping(value: Value) -> Mapping {
    match value {
        Value::Mapping(mapping) => mapping,
        _ => Mapping::new(),
    }
}

fn defines_prefix(document: &Mapping) -> bool {
    match document.get("database") {
        Some(Value::Mapping(database)) => database
            .get("prefix")
            .is_some_and(|prefix| !prefix.is_null()),
        _ => false,
    }
}
