//! # Error Handling
//!
//! This module defines the centralized error type for the `chassis` library.
//! It uses the `thiserror` library to create an `Error` enum that covers the
//! failure modes of configuration resolution and extension management.
//!
//! ## Severity
//!
//! The variants fall into two groups, and callers are expected to treat them
//! differently:
//!
//! - **Configuration errors** (`ConfigNotFound`, `ConfigSyntax`,
//!   `MissingConfigKey`, `InvalidConfig`) are fatal. A partially resolved configuration would
//!   misconfigure the provisioned machine, so the binary exits non-zero.
//! - **Extension and update errors** (`GitClone`, `GitCommand`) are reported
//!   and the run continues. The installer records them per extension and
//!   the update checker downgrades them to "no update available".
//!
//! The `Result` type alias is used to return `Result<T, Error>` from
//! functions throughout the library.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for chassis operations
#[derive(Error, Debug)]
pub enum Error {
    /// The required base configuration file does not exist.
    #[error("Configuration file not found: {}{}", path.display(), hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigNotFound {
        path: PathBuf,
        /// Optional hint for how to create the file
        hint: Option<String>,
    },

    /// A configuration layer exists but could not be parsed.
    #[error("Could not load config {}:\n    {message}", path.display())]
    ConfigSyntax { path: PathBuf, message: String },

    /// A key that must be present after all layers are merged is missing.
    #[error("{key} is required but was not found{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    MissingConfigKey {
        key: String,
        /// Optional hint for how to fix the configuration
        hint: Option<String>,
    },

    /// A configuration value is present but unusable.
    #[error("Invalid value for {field}: {message}")]
    InvalidConfig { field: String, message: String },

    /// Cloning an extension repository failed.
    #[error("Git clone error for {url} into {}: {message}{}", target.display(), hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    GitClone {
        url: String,
        target: PathBuf,
        message: String,
        /// Optional hint for how to resolve the clone issue
        hint: Option<String>,
    },

    /// A git command exited unsuccessfully or could not be spawned.
    #[error("Git command failed in {}: git {command} - {stderr}", dir.display())]
    GitCommand {
        command: String,
        dir: PathBuf,
        stderr: String,
    },

    /// Reading a confirmation from the user failed.
    #[error("Prompt error: {message}")]
    Prompt { message: String },

    /// An error indicating that a mutex or other lock has been poisoned.
    #[error("Lock poisoned: {context}")]
    LockPoisoned { context: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML error, wrapped from `serde_yaml::Error`.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A JSON serialization error, wrapped from `serde_json::Error`.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether this error must abort the run.
    ///
    /// Configuration errors are fatal; everything the extension and update
    /// subsystems produce is reported and skipped.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::ConfigNotFound { .. }
                | Error::ConfigSyntax { .. }
                | Error::MissingConfigKey { .. }
                | Error::InvalidConfig { .. }
        )
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
