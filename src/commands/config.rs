//! # Config Command Implementation
//!
//! This module implements the `config` subcommand, which resolves the
//! project's configuration layers exactly as provisioning would and prints
//! the result. Warnings raised during normalization go to stderr, so stdout
//! stays machine-readable.
//!
//! A missing `config.yaml`, a syntax error in any layer, a missing
//! `database.prefix` or an unusable `paths.base` makes the command fail.

use anyhow::Result;
use clap::{Args, ValueEnum};

use chassis::config;

use super::Context;

/// Output format for the resolved configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum Format {
    #[default]
    Yaml,
    Json,
}

/// Print the merged, normalized configuration
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Output format.
    #[arg(short, long, value_enum, default_value = "yaml")]
    pub format: Format,
}

/// Execute the `config` command.
pub fn execute(args: ConfigArgs, context: &Context) -> Result<()> {
    let reporter = context.reporter();
    let configuration = config::resolve(&context.layout, &reporter)?;

    let rendered = match args.format {
        Format::Yaml => serde_yaml::to_string(&configuration)?,
        Format::Json => serde_json::to_string_pretty(&configuration)? + "\n",
    };
    print!("{}", rendered);

    Ok(())
}
