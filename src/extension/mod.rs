//! # Extensions
//!
//! An extension is a git repository cloned into `extensions/<folder>`. Users
//! refer to extensions by an identifier in `config.yaml`, which is one of:
//!
//! - a bare name such as `nodejs`, hosted under the official organisation;
//! - `account/repo` shorthand for any GitHub repository;
//! - a full clone URL, used verbatim.
//!
//! [`ExtensionSource::classify`] turns an identifier into one of these cases
//! and [`folder_name`] derives the directory it is cloned into. Both are pure
//! functions; the filesystem side lives in [`registry`] and [`installer`].

pub mod installer;
pub mod registry;

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_yaml::Mapping;

use crate::config::schema::coerce;
use crate::defaults;

pub use installer::{ExtensionInstaller, InstallOutcome, InstallSummary, Rename};
pub use registry::ExtensionRegistry;

static OFFICIAL_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w-]+$").expect("valid regex"));
static ACCOUNT_REPO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w-]+/[\w-]+$").expect("valid regex"));

/// Where an extension identifier points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtensionSource {
    /// A bare name in the official organisation, e.g. `nodejs`.
    Official(String),
    /// `account/repo` shorthand.
    Hosted(String),
    /// A full URI, used as given.
    Uri(String),
}

impl ExtensionSource {
    /// Classify an identifier. Every string classifies; anything that is not
    /// a bare name or `account/repo` is treated as a URI.
    pub fn classify(identifier: &str) -> Self {
        if OFFICIAL_NAME.is_match(identifier) {
            ExtensionSource::Official(identifier.to_string())
        } else if ACCOUNT_REPO.is_match(identifier) {
            ExtensionSource::Hosted(identifier.to_string())
        } else {
            ExtensionSource::Uri(identifier.to_string())
        }
    }

    /// The location to clone from.
    pub fn location(&self) -> String {
        match self {
            ExtensionSource::Official(name) => {
                format!("{}{}", defaults::OFFICIAL_EXTENSION_BASE, name)
            }
            ExtensionSource::Hosted(path) => format!("{}{}", defaults::HOSTED_REPO_BASE, path),
            ExtensionSource::Uri(uri) => uri.clone(),
        }
    }
}

/// Directory name an extension is cloned into.
///
/// The last `/`-separated segment of `source`, without a trailing `.git`,
/// lowercased. From schema version 3 hyphens become underscores, since the
/// provisioning manifests reject hyphenated class names.
pub fn folder_name(source: &str, schema_version: u32) -> String {
    let segment = source
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or(source);
    let segment = segment.strip_suffix(defaults::VCS_SUFFIX).unwrap_or(segment);
    let name = segment.to_lowercase();

    if schema_version >= defaults::UNDERSCORE_NAMING_VERSION {
        name.replace('-', "_")
    } else {
        name
    }
}

/// Contents of an extension's own `chassis.yaml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtensionConfig {
    /// Extension schema version; 1 when the extension has no config file.
    #[serde(default = "legacy_version")]
    pub version: u32,

    /// Identifiers of extensions this one needs.
    #[serde(default, deserialize_with = "coerce::string_list")]
    pub dependencies: Vec<String>,

    #[serde(flatten)]
    pub extra: Mapping,
}

fn legacy_version() -> u32 {
    1
}

impl Default for ExtensionConfig {
    fn default() -> Self {
        Self {
            version: legacy_version(),
            dependencies: Vec::new(),
            extra: Mapping::new(),
        }
    }
}
