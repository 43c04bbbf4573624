//! # Error Suggestions
//!
//! This module provides helper functions for generating the hint text
//! attached to errors. Errors should tell users what went wrong AND how to
//! fix it.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use crate::suggestions;
//!
//! return Err(Error::MissingConfigKey {
//!     key: "database.prefix".to_string(),
//!     hint: Some(suggestions::database_prefix()),
//! });
//! ```

use std::path::Path;

/// Hint for a project root without `config.yaml`.
pub fn config_not_found(root: &Path) -> String {
    format!(
        "Run chassis from the project root or pass --root\n  \
         hint: Searched for config.yaml in {}",
        root.display()
    )
}

/// Hint for a configuration that predates the required database prefix.
pub fn database_prefix() -> String {
    "database.prefix became required on 2016-11-25; add it to config.yaml:\n      \
     database:\n        prefix: wp_"
        .to_string()
}

/// Hint for an unusable `paths.base`.
pub fn paths_base() -> String {
    "Set paths.base to a directory, relative to the project root or absolute".to_string()
}

/// Hint for a failed clone, based on git's stderr.
///
/// Returns `None` when there is nothing more useful to say than git's own
/// message.
pub fn clone_failure(stderr: &str) -> Option<String> {
    if stderr.contains("Authentication failed")
        || stderr.contains("Permission denied")
        || stderr.contains("Could not read from remote repository")
    {
        Some(
            "Make sure you have access to the repository: \
             check your SSH agent, git credential helper or access token"
                .to_string(),
        )
    } else if stderr.contains("not found") || stderr.contains("does not exist") {
        Some(
            "Check the extension name in config.yaml; bare names resolve to \
             https://github.com/chassis/<name>"
                .to_string(),
        )
    } else {
        None
    }
}

/// Underscore spelling for a hyphenated extension identifier.
///
/// Returns `None` if the identifier has no hyphen.
pub fn underscore_identifier(identifier: &str) -> Option<String> {
    identifier
        .contains('-')
        .then(|| identifier.replace('-', "_"))
}
