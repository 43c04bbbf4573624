//! # Update Command Implementation
//!
//! This module implements the `update` subcommand, which checks Chassis core,
//! its submodules, project extensions and per-user global extensions for
//! upstream changes.
//!
//! ## Functionality
//!
//! - **Selection**: Each component kind is checked only when enabled under
//!   `auto_update` in the configuration. `--force` checks all of them.
//!
//! - **Interactive Confirmation**: Stale components are listed and the user
//!   is asked before anything is pulled. This can be bypassed with the
//!   `--yes` flag.
//!
//! - **Check Only**: `--check` prints stale components without prompting or
//!   pulling.
//!
//! Checks never change the branch a component has checked out. Failed
//! checks count as up to date, and failed pulls are reported without
//! stopping the remaining updates.

use anyhow::Result;
use clap::Args;

use chassis::config;
use chassis::extension::ExtensionRegistry;
use chassis::output::{AssumeYes, Prompt, Reporter, TerminalPrompt};
use chassis::update::{AutoUpdater, UpdateOptions};
use chassis::vcs::GitCli;

use super::Context;

/// Check core, submodules and extensions for upstream updates
#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// If set, updates are applied without asking for confirmation.
    #[arg(long, short)]
    pub yes: bool,

    /// If set, the command only reports stale components.
    #[arg(long, conflicts_with = "yes")]
    pub check: bool,

    /// Check every component, ignoring the auto_update settings.
    #[arg(long)]
    pub force: bool,
}

/// Execute the `update` command.
pub fn execute(args: UpdateArgs, context: &Context) -> Result<()> {
    let reporter = context.reporter();
    let configuration = config::resolve(&context.layout, &reporter)?;
    let registry = ExtensionRegistry::new(&context.layout);

    let prompt: Box<dyn Prompt> = if args.yes {
        Box::new(AssumeYes)
    } else {
        Box::new(TerminalPrompt)
    };

    let updater = AutoUpdater::new(
        &context.layout,
        &registry,
        &GitCli,
        prompt.as_ref(),
        &reporter,
    );
    let run = updater.run(
        &configuration.auto_update,
        UpdateOptions {
            force: args.force,
            check_only: args.check,
        },
    )?;

    if args.check {
        if run.stale.is_empty() && !run.submodules_stale {
            reporter.success("Everything is up to date.");
        }
        for record in &run.stale {
            println!(
                "{} is {} commit(s) behind ({})",
                record.component,
                record.behind,
                record.directory.display()
            );
        }
        if run.submodules_stale {
            println!("submodules are out of date");
        }
        return Ok(());
    }

    if !run.failed.is_empty() {
        let names: Vec<&str> = run.failed.iter().map(|(name, _)| name.as_str()).collect();
        reporter.warn(&format!("Could not update: {}", names.join(", ")));
    }
    Ok(())
}
