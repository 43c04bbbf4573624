//! # Extensions Command Implementation
//!
//! This module implements the `extensions` subcommand group.
//!
//! ## Functionality
//!
//! - **`list`**: Prints installed extension names, one per line. `--global`
//!   lists the project's `extensions/_global` directory instead, leaving out
//!   names that are also installed locally. `--version` keeps only
//!   extensions whose `chassis.yaml` declares that schema version.
//!
//! - **`install`**: Without arguments, installs every extension listed in
//!   the configuration plus the dependencies of installed version 2
//!   extensions, as provisioning does. With identifiers, installs just
//!   those. Extensions already present are left alone. A failed clone does
//!   not stop the others, but makes the command exit non-zero.

use anyhow::{bail, Result};
use clap::{Args, Subcommand};

use chassis::config;
use chassis::extension::{ExtensionInstaller, ExtensionRegistry, InstallOutcome};
use chassis::output::Reporter;
use chassis::vcs::GitCli;

use super::Context;

/// List or install extensions
#[derive(Subcommand, Debug)]
pub enum ExtensionsCommand {
    /// List installed extensions
    List(ListArgs),

    /// Install declared extensions, or the given identifiers
    Install(InstallArgs),
}

/// Arguments for `extensions list`
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only list extensions declaring this schema version.
    #[arg(long, value_name = "N")]
    pub version: Option<u32>,

    /// List shared extensions from extensions/_global.
    #[arg(long)]
    pub global: bool,
}

/// Arguments for `extensions install`
#[derive(Args, Debug)]
pub struct InstallArgs {
    /// Extension names, account/repo shorthands or clone URLs.
    ///
    /// When omitted, the extensions declared in the configuration are
    /// installed.
    #[arg(value_name = "IDENTIFIER")]
    pub identifiers: Vec<String>,
}

/// Execute an `extensions` subcommand.
pub fn execute(command: ExtensionsCommand, context: &Context) -> Result<()> {
    match command {
        ExtensionsCommand::List(args) => list(args, context),
        ExtensionsCommand::Install(args) => install(args, context),
    }
}

fn list(args: ListArgs, context: &Context) -> Result<()> {
    let registry = ExtensionRegistry::new(&context.layout);
    let names = if args.global {
        registry.list_global(args.version)?
    } else {
        registry.list_local(args.version)?
    };

    if names.is_empty() {
        println!("No extensions installed.");
        return Ok(());
    }

    for name in names {
        println!("{}", name);
    }
    Ok(())
}

fn install(args: InstallArgs, context: &Context) -> Result<()> {
    let reporter = context.reporter();
    let configuration = config::resolve(&context.layout, &reporter)?;
    let registry = ExtensionRegistry::new(&context.layout);
    let installer = ExtensionInstaller::new(&registry, &GitCli, &reporter);

    if args.identifiers.is_empty() {
        let summary = installer.install_declared(&configuration)?;
        if !summary.installed.is_empty() {
            reporter.success(&format!("Installed: {}", summary.installed.join(", ")));
        }
        if summary.installed.is_empty() && summary.failed.is_empty() {
            reporter.success("All declared extensions are installed.");
        }
        if !summary.is_success() {
            bail!("{} extension(s) could not be installed", summary.failed.len());
        }
        return Ok(());
    }

    let mut failures = 0;
    for identifier in &args.identifiers {
        match installer.install(identifier, configuration.schema_version) {
            Ok(InstallOutcome::Installed(folder)) => {
                reporter.success(&format!("Installed {} into extensions/{}", identifier, folder))
            }
            Ok(InstallOutcome::AlreadyPresent(folder)) => {
                reporter.report(&format!("extensions/{} already exists; skipping {}", folder, identifier))
            }
            Err(e) => {
                reporter.warn(&format!("Could not install {}: {}", identifier, e));
                failures += 1;
            }
        }
    }

    if failures > 0 {
        bail!("{} extension(s) could not be installed", failures);
    }
    Ok(())
}
