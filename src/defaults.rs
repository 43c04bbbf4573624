//! Default values for chassis configuration.
//!
//! This module provides centralized constants used across the library and
//! commands, ensuring the file layout, mount tags and remote locations are
//! spelled the same everywhere.

use std::path::PathBuf;

/// The version-controlled base configuration, relative to the project root.
pub const BASE_CONFIG_FILE: &str = "config.yaml";

/// Optional override layers, applied in this order after the base file.
pub const OVERRIDE_CONFIG_FILES: [&str; 3] = [
    "config.local.yaml",
    "content/config.yaml",
    "content/config.local.yaml",
];

/// Directory holding project extensions, relative to the project root.
pub const EXTENSIONS_DIR: &str = "extensions";

/// Sentinel directory inside the extensions directory holding shared extensions.
pub const GLOBAL_EXTENSIONS_SENTINEL: &str = "_global";

/// Per-extension configuration file name.
pub const EXTENSION_CONFIG_FILE: &str = "chassis.yaml";

/// Base URL for bare extension names such as `nodejs`.
pub const OFFICIAL_EXTENSION_BASE: &str = "https://github.com/chassis/";

/// Base URL for `account/repo` shorthand.
pub const HOSTED_REPO_BASE: &str = "https://github.com/";

/// Suffix stripped from the last path segment when deriving a folder name.
pub const VCS_SUFFIX: &str = ".git";

/// Hostname suffix that resolves without editing the hosts file.
pub const LOCAL_HOST_SUFFIX: &str = ".local";

/// In-guest location of the project root.
pub const GUEST_PROJECT_ROOT: &str = "/vagrant";

/// In-guest mount tag for directories outside the project root.
pub const EXTERNAL_MOUNT_TAG: &str = "/chassis";

/// Component name that refers to the project checkout itself.
pub const CORE_COMPONENT: &str = "core";

/// Placeholder extension shipped with the project; never checked for updates.
pub const EXAMPLE_COMPONENT: &str = "example";

/// Branch that update checks compare against upstream.
pub const MAIN_BRANCH: &str = "master";

/// Schema version from which extension folder names use underscores.
pub const UNDERSCORE_NAMING_VERSION: u32 = 3;

/// Extension schema version whose declared dependencies are installed.
pub const DEPENDENCY_SCHEMA_VERSION: u32 = 2;

/// Returns the per-user global extensions directory.
///
/// Resolves to `~/.chassis/extensions`. Returns `None` when the home
/// directory cannot be determined, in which case global extension updates
/// are skipped.
pub fn user_extensions_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".chassis").join(EXTENSIONS_DIR))
}
