//! Loading of structured YAML documents from disk.
//!
//! The configuration loader and the extension registry both read YAML
//! documents that may legitimately be absent. [`DocumentStore`] folds the
//! three possible outcomes into one signature: `Ok(Some(doc))`, `Ok(None)` for
//! a missing file, and `Err(Error::ConfigSyntax)` for a file that exists but
//! does not parse.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use log::debug;
use serde_yaml::Value;

use crate::error::{Error, Result};

/// Trait for document loading - allows substituting an in-memory store in tests
pub trait DocumentStore: Send + Sync {
    /// Parse the document at `path`, returning `None` if it does not exist.
    fn load(&self, path: &Path) -> Result<Option<Value>>;
}

/// The default implementation of `DocumentStore`, reading YAML files from
/// the host filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct YamlDocumentStore;

impl DocumentStore for YamlDocumentStore {
    fn load(&self, path: &Path) -> Result<Option<Value>> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No document at {}", path.display());
                return Ok(None);
            }
            Err(e) => return Err(Error::Io(e)),
        };

        parse(path, &content).map(Some)
    }
}

/// Parse YAML text, attributing any syntax error to `path`.
pub fn parse(path: &Path, content: &str) -> Result<Value> {
    // Comment-only files are valid override layers with nothing in them.
    let blank = content
        .lines()
        .map(str::trim)
        .all(|line| line.is_empty() || line.starts_with('#') || line == "---");
    if blank {
        return Ok(Value::Null);
    }

    serde_yaml::from_str(content).map_err(|e| Error::ConfigSyntax {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
