//! CLI argument parsing and command dispatch

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};

use chassis::layout::Layout;
use chassis::output::OutputConfig;

use crate::commands::{self, Context};

/// Chassis - Bootstrap a Chassis WordPress development machine
#[derive(Parser, Debug)]
#[command(name = "chassis")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// The Chassis project root.
    ///
    /// Defaults to the current directory.
    #[arg(long, global = true, value_name = "DIR", env = "CHASSIS_ROOT")]
    root: Option<PathBuf>,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the merged, normalized configuration
    Config(commands::config::ConfigArgs),

    /// List or install extensions
    #[command(subcommand)]
    Extensions(commands::extensions::ExtensionsCommand),

    /// Check core, submodules and extensions for upstream updates
    Update(commands::update::UpdateArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        // RUST_LOG takes precedence over --log-level
        env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or(self.log_level.as_str()),
        )
        .init();

        if let Commands::Completions(args) = self.command {
            return commands::completions::execute(args);
        }

        let root = match &self.root {
            Some(root) => absolute(root)?,
            None => env::current_dir().context("Could not determine the current directory")?,
        };
        let context = Context {
            layout: Layout::new(root),
            output: OutputConfig::from_env_and_flag(&self.color),
        };

        match self.command {
            Commands::Config(args) => commands::config::execute(args, &context),
            Commands::Extensions(command) => commands::extensions::execute(command, &context),
            Commands::Update(args) => commands::update::execute(args, &context),
            Commands::Completions(_) => Ok(()),
        }
    }
}

/// `path` as an absolute path, resolving symlinks when it exists.
fn absolute(path: &Path) -> Result<PathBuf> {
    if let Ok(canonical) = path.canonicalize() {
        return Ok(canonical);
    }
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    Ok(env::current_dir()
        .context("Could not determine the current directory")?
        .join(path))
}
