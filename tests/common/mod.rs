//! Shared test utilities for integration and E2E tests.
//!
//! This module provides common fixtures, helper functions, and configuration
//! snippets to reduce duplication across test files.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_config(configs::MINIMAL);
//!     fixture.command().arg("config").assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use assert_fs::TempDir;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::configs;
    pub use super::TestFixture;
}

/// Common configuration YAML snippets for testing.
#[allow(dead_code)]
pub mod configs {
    /// Smallest configuration that resolves.
    pub const MINIMAL: &str = r#"
hosts:
  - vagrant.local
database:
  prefix: wp_
paths:
  base: .
  wp: wp
  content: content
"#;

    /// Schema version 3 project declaring extensions.
    pub const WITH_EXTENSIONS: &str = r#"
version: 3
hosts:
  - vagrant.local
database:
  prefix: wp_
paths:
  base: .
  wp: wp
  content: content
extensions:
  - nodejs
"#;

    /// Predates the required database prefix.
    pub const NO_PREFIX: &str = r#"
hosts:
  - vagrant.local
paths:
  base: .
"#;

    /// Invalid YAML for error testing.
    pub const INVALID_YAML: &str = "hosts: [unclosed\n";
}

/// A test fixture that provides a temporary Chassis project.
///
/// # Example
///
/// ```rust,ignore
/// let fixture = TestFixture::new()
///     .with_config(configs::MINIMAL)
///     .with_extension("nodejs", None);
///
/// fixture.command().args(["extensions", "list"]).assert().success();
/// ```
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Write `config.yaml` with the given content.
    pub fn with_config(self, content: &str) -> Self {
        self.with_file("config.yaml", content)
    }

    /// Add a file with the given path and content.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Add an installed extension, optionally with its own `chassis.yaml`.
    #[allow(dead_code)]
    pub fn with_extension(self, name: &str, config: Option<&str>) -> Self {
        let dir = self.temp_dir.child("extensions").child(name);
        dir.create_dir_all().expect("Failed to create extension");
        if let Some(config) = config {
            dir.child("chassis.yaml")
                .write_str(config)
                .expect("Failed to write extension config");
        }
        self
    }

    /// Get the path to the project root.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Get the path to `extensions/`.
    #[allow(dead_code)]
    pub fn extensions_dir(&self) -> PathBuf {
        self.path().join("extensions")
    }

    /// Create a child path in the temp directory.
    #[allow(dead_code)]
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }

    /// Create a command configured to run against this project.
    ///
    /// Colors are disabled and `CHASSIS_ROOT` from the outer environment is
    /// ignored, so output is stable.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("chassis");
        cmd.current_dir(self.path())
            .env_remove("CHASSIS_ROOT")
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_with_config() {
        let fixture = TestFixture::new().with_config(configs::MINIMAL);
        assert!(fixture.path().join("config.yaml").exists());
    }

    #[test]
    fn test_fixture_with_extension() {
        let fixture = TestFixture::new().with_extension("nodejs", Some("version: 2\n"));
        assert!(fixture.extensions_dir().join("nodejs/chassis.yaml").exists());
    }

    #[test]
    fn test_configs_are_valid_yaml() {
        for config in [configs::MINIMAL, configs::WITH_EXTENSIONS, configs::NO_PREFIX] {
            serde_yaml::from_str::<serde_yaml::Value>(config).expect("Config should be valid YAML");
        }
    }

    #[test]
    fn test_invalid_yaml_is_actually_invalid() {
        let result = serde_yaml::from_str::<serde_yaml::Value>(configs::INVALID_YAML);
        assert!(result.is_err(), "INVALID_YAML should not parse");
    }
}
