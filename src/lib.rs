//! # Chassis Bootstrap Library
//!
//! This library provides the host-side half of provisioning a Chassis
//! development machine. It is used by the `chassis` command-line tool but
//! can be embedded by anything that needs a project's resolved
//! configuration or wants to manage its extensions.
//!
//! ## Quick Example
//!
//! ```no_run
//! use chassis::config;
//! use chassis::layout::Layout;
//! use chassis::output::{ConsoleReporter, OutputConfig};
//!
//! let layout = Layout::new("/path/to/project");
//! let reporter = ConsoleReporter::new(OutputConfig::default());
//!
//! let configuration = config::resolve(&layout, &reporter)?;
//! println!("WordPress is mounted at {}", configuration.mapped_paths["wp"]);
//! # Ok::<(), chassis::error::Error>(())
//! ```
//!
//! ## Core Concepts
//!
//! - **Configuration (`config`)**: up to four YAML layers merged into one
//!   typed [`config::Configuration`], with every path made absolute and
//!   mapped to its location inside the machine.
//! - **Extensions (`extension`)**: git repositories under `extensions/`,
//!   named by a bare name, `account/repo` or a URL. The registry lists them
//!   and the installer clones missing ones plus their dependencies.
//! - **Updates (`update`)**: advisory checks of core, submodules and
//!   extensions against upstream, with a confirmation before pulling.
//! - **Capabilities (`vcs`, `output`, `document`)**: traits for git, user
//!   interaction and document loading, so every component above can run
//!   against fakes.
//!
//! ## Failure Model
//!
//! Configuration errors are fatal: a half-resolved configuration would
//! provision the wrong machine. Extension and update errors are reported and
//! the run carries on.

pub mod cache;
pub mod config;
pub mod defaults;
pub mod document;
pub mod error;
pub mod extension;
pub mod git;
pub mod layout;
pub mod output;
pub mod path;
pub mod suggestions;
pub mod update;
pub mod vcs;

#[cfg(test)]
mod path_proptest;
