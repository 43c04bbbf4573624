//! # Configuration Resolution
//!
//! A Chassis project is configured through up to four YAML files. This module
//! turns them into one typed, normalized [`Configuration`]:
//!
//! 1. **Loading** ([`loader`]): the layers are merged with shallow top-level
//!    overwrite and `database.prefix` is enforced.
//! 2. **Typing** ([`schema`]): the merged tree is deserialized, coercing
//!    scalar fields such as `php` and `nfs` to fixed types.
//! 3. **Normalization** ([`paths`]): `paths.*` become absolute and the
//!    in-guest `mapped_paths` and `synced_folders` are derived.
//!
//! Every error produced here is fatal to the run.

pub mod loader;
pub mod paths;
pub mod schema;

pub use loader::{ConfigLoader, MergedDocument};
pub use paths::PathNormalizer;
pub use schema::{AutoUpdate, Configuration, Database, PathSetting, Paths};

use crate::error::Result;
use crate::layout::Layout;
use crate::output::Reporter;

/// Load and normalize the configuration of the project at `layout`.
pub fn resolve(layout: &Layout, reporter: &dyn Reporter) -> Result<Configuration> {
    let loaded = ConfigLoader::new(layout.root()).load()?;
    PathNormalizer::new(layout.root(), reporter).normalize(&loaded)
}
