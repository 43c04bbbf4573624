//! # Chassis CLI
//!
//! This is the binary entry point for the `chassis` command-line tool.
//!
//! Its primary responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Executing the appropriate command based on the parsed arguments.
//! - Returning errors from `main`, which prints them and exits non-zero.
//!
//! Resolving configuration, installing extensions and checking for updates
//! all happen in the `chassis` library; the binary only wires the terminal
//! to it.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
