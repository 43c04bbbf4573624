//! Typed configuration schema.
//!
//! The merged YAML tree is materialised into [`Configuration`] once, and the
//! scalar coercion rules live in [`coerce`] so that every consumer sees the
//! same fixed types regardless of how a value was written.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

use crate::error::{Error, Result};

/// A fully merged Chassis configuration.
///
/// Unknown keys are kept in `extra` so downstream provisioning sees
/// everything the user wrote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    /// Schema version governing extension naming (`version` in YAML).
    #[serde(rename = "version", default = "default_schema_version")]
    pub schema_version: u32,

    pub database: Database,

    #[serde(default)]
    pub paths: Paths,

    /// Deprecated alias for `paths.wp`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wpdir: Option<PathSetting>,

    #[serde(default, deserialize_with = "coerce::string_list")]
    pub hosts: Vec<String>,

    /// Host path to mount tag, for directories outside the project root.
    #[serde(default, deserialize_with = "coerce::string_map")]
    pub synced_folders: BTreeMap<String, String>,

    /// Logical name (`base`, `wp`, `content`) to in-guest path.
    #[serde(default, deserialize_with = "coerce::string_map")]
    pub mapped_paths: BTreeMap<String, String>,

    #[serde(default)]
    pub auto_update: AutoUpdate,

    /// Extension identifiers declared by the user.
    #[serde(default, deserialize_with = "coerce::string_list")]
    pub extensions: Vec<String>,

    #[serde(default, deserialize_with = "coerce::to_bool")]
    pub nfs: bool,

    #[serde(default, deserialize_with = "coerce::to_string")]
    pub php: String,

    #[serde(default, deserialize_with = "coerce::to_string")]
    pub machine_name: String,

    #[serde(default, deserialize_with = "coerce::to_string")]
    pub upload_size: String,

    #[serde(flatten)]
    pub extra: Mapping,
}

fn default_schema_version() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Database {
    #[serde(deserialize_with = "coerce::to_string")]
    pub prefix: String,

    /// True iff an override layer supplied `database.prefix`.
    #[serde(default)]
    pub has_custom_prefix: bool,

    #[serde(flatten)]
    pub extra: Mapping,
}

/// The `paths` section.
///
/// Values are kept as [`PathSetting`] so that a value of the wrong type can
/// be told apart from a missing one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Paths {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<PathSetting>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wp: Option<PathSetting>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<PathSetting>,

    #[serde(flatten)]
    pub extra: Mapping,
}

impl Paths {
    /// The base path, if it is a usable string.
    pub fn base(&self) -> Option<&Path> {
        self.base.as_ref().and_then(PathSetting::as_path)
    }

    pub fn wp(&self) -> Option<&Path> {
        self.wp.as_ref().and_then(PathSetting::as_path)
    }

    pub fn content(&self) -> Option<&Path> {
        self.content.as_ref().and_then(PathSetting::as_path)
    }
}

/// A path value as written by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSetting {
    Path(PathBuf),
    /// Anything that is not a string, e.g. a number or a list.
    Invalid(Value),
}

impl PathSetting {
    pub fn as_path(&self) -> Option<&Path> {
        match self {
            PathSetting::Path(path) if !path.as_os_str().is_empty() => Some(path),
            _ => None,
        }
    }
}

/// Which components are checked for updates on each run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoUpdate {
    #[serde(default, deserialize_with = "coerce::to_bool")]
    pub core: bool,
    #[serde(default, deserialize_with = "coerce::to_bool")]
    pub submodules: bool,
    #[serde(default, deserialize_with = "coerce::to_bool")]
    pub extensions: bool,
    #[serde(default, deserialize_with = "coerce::to_bool")]
    pub global_extensions: bool,
}

impl AutoUpdate {
    /// Every check enabled.
    pub fn all() -> Self {
        Self {
            core: true,
            submodules: true,
            extensions: true,
            global_extensions: true,
        }
    }
}

impl Configuration {
    /// Materialise a merged YAML tree.
    ///
    /// Type mismatches the coercion rules cannot resolve are reported as
    /// [`Error::InvalidConfig`] naming the offending key, e.g.
    /// `auto_update.core`.
    pub fn from_value(value: Value) -> Result<Self> {
        serde_path_to_error::deserialize(value).map_err(|e| {
            let field = match e.path().to_string() {
                path if path == "." => "configuration".to_string(),
                path => path,
            };
            Error::InvalidConfig {
                field,
                message: e.into_inner().to_string(),
            }
        })
    }

    /// Serialise back to a YAML tree.
    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_yaml::to_value(self)?)
    }
}

/// Scalar coercion rules, stated once.
///
/// - to bool: booleans as-is; `null` is false; integers `0`/`1`; strings
///   `true|yes|on|1` and `false|no|off|0|""` (case-insensitive).
/// - to string: strings as-is; `null` is empty; booleans and numbers use
///   their canonical text.
///
/// Sequences, mappings and anything else outside these rules is an error.
pub mod coerce {
    use std::collections::BTreeMap;

    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer};
    use serde_yaml::Value;

    /// Coerce a YAML value to a boolean.
    pub fn bool_value(value: &Value) -> Result<bool, String> {
        match value {
            Value::Null => Ok(false),
            Value::Bool(b) => Ok(*b),
            Value::Number(n) => match n.as_i64() {
                Some(0) => Ok(false),
                Some(1) => Ok(true),
                _ => Err(format!("cannot interpret number {} as a boolean", n)),
            },
            Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "yes" | "on" | "1" => Ok(true),
                "false" | "no" | "off" | "0" | "" => Ok(false),
                _ => Err(format!("cannot interpret \"{}\" as a boolean", s)),
            },
            Value::Tagged(tagged) => bool_value(&tagged.value),
            _ => Err("expected a boolean, found a sequence or mapping".to_string()),
        }
    }

    /// Coerce a YAML value to a string.
    pub fn string_value(value: &Value) -> Result<String, String> {
        match value {
            Value::Null => Ok(String::new()),
            Value::Bool(b) => Ok(b.to_string()),
            Value::Number(n) => Ok(n.to_string()),
            Value::String(s) => Ok(s.clone()),
            Value::Tagged(tagged) => string_value(&tagged.value),
            _ => Err("expected a scalar, found a sequence or mapping".to_string()),
        }
    }

    pub fn to_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        let value = Value::deserialize(deserializer)?;
        bool_value(&value).map_err(D::Error::custom)
    }

    pub fn to_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        let value = Value::deserialize(deserializer)?;
        string_value(&value).map_err(D::Error::custom)
    }

    /// A sequence of scalars; `null` is the empty list.
    pub fn string_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(Vec::new()),
            Value::Sequence(items) => items
                .iter()
                .map(|item| string_value(item).map_err(D::Error::custom))
                .collect(),
            other => Err(D::Error::custom(format!(
                "expected a list, found {}",
                describe(&other)
            ))),
        }
    }

    /// A mapping of scalars to scalars; `null` is the empty map.
    pub fn string_map<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<BTreeMap<String, String>, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(BTreeMap::new()),
            Value::Mapping(map) => map
                .iter()
                .map(|(k, v)| {
                    let key = string_value(k).map_err(D::Error::custom)?;
                    let value = string_value(v).map_err(D::Error::custom)?;
                    Ok((key, value))
                })
                .collect(),
            other => Err(D::Error::custom(format!(
                "expected a mapping, found {}",
                describe(&other)
            ))),
        }
    }

    fn describe(value: &Value) -> &'static str {
        match value {
            Value::Null => "null",
            Value::Bool(_) => "a boolean",
            Value::Number(_) => "a number",
            Value::String(_) => "a string",
            Value::Sequence(_) => "a sequence",
            Value::Mapping(_) => "a mapping",
            Value::Tagged(_) => "a tagged value",
        }
    }
}
