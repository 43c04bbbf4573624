//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the `chassis`
//! command-line tool. Each subcommand is defined in its own file to keep the
//! logic separated and maintainable.
//!
//! ## Structure
//!
//! Each command module typically contains:
//! - An `Args` struct that defines the command-specific arguments and options,
//!   derived using `clap`.
//! - An `execute` function that takes the parsed `Args` and the shared
//!   [`Context`] and performs the command's logic.

pub mod completions;
pub mod config;
pub mod extensions;
pub mod update;

use chassis::layout::Layout;
use chassis::output::{ConsoleReporter, OutputConfig};

/// Settings derived from the global flags.
#[derive(Debug, Clone)]
pub struct Context {
    pub layout: Layout,
    pub output: OutputConfig,
}

impl Context {
    pub fn reporter(&self) -> ConsoleReporter {
        ConsoleReporter::new(self.output.clone())
    }
}
