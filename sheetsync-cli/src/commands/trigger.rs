//! Trigger command - manage the recurring-trigger registry.

use anyhow::Result;
use clap::{Args, Subcommand};

use sheetsync_core::config::DEFAULT_PERIOD_MINUTES;

use crate::output::{json, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the trigger command.
#[derive(Args)]
pub struct TriggerArgs {
    /// Handler name; defaults to the configured trigger name.
    #[arg(long)]
    pub handler: Option<String>,

    /// Trigger subcommand.
    #[command(subcommand)]
    pub command: TriggerCommands,
}

/// Trigger subcommands.
#[derive(Subcommand)]
pub enum TriggerCommands {
    /// List registered triggers.
    List,
    /// Register the trigger if it is missing (hourly by default).
    Ensure,
    /// Replace the trigger, or remove it with --disabled.
    Set {
        /// Firing period in minutes.
        #[arg(long, default_value_t = DEFAULT_PERIOD_MINUTES, value_parser = clap::value_parser!(u64).range(1..))]
        period: u64,
        /// Remove the trigger instead of creating one.
        #[arg(long)]
        disabled: bool,
    },
    /// Remove all triggers for the handler.
    Clear,
}

/// Resolves the handler name, falling back to the configured trigger name.
async fn handler_name(args: &TriggerArgs, cli: &Cli) -> Result<String> {
    if let Some(handler) = &args.handler {
        return Ok(handler.clone());
    }
    let config = cli.resolver().resolve().await?;
    Ok(config.trigger_name().to_string())
}

/// Runs the trigger command.
pub async fn run(args: &TriggerArgs, cli: &Cli) -> Result<()> {
    let registry = cli.registry();

    match &args.command {
        TriggerCommands::List => {
            let triggers = registry.list().await?;
            match cli.format {
                OutputFormat::Text => {
                    let formatter = TextFormatter::new(!cli.no_color);
                    println!("{}", formatter.format_triggers(&triggers));
                }
                OutputFormat::Json => println!("{}", json::triggers(&triggers, cli.pretty)?),
            }
        }
        TriggerCommands::Ensure => {
            let handler = handler_name(args, cli).await?;
            registry.ensure(&handler).await?;
            if !cli.quiet {
                println!("Trigger ensured for {handler:?}");
            }
        }
        TriggerCommands::Set { period, disabled } => {
            let handler = handler_name(args, cli).await?;
            registry.configure(&handler, *period, !disabled).await?;
            if !cli.quiet {
                if *disabled {
                    println!("Trigger disabled for {handler:?}");
                } else {
                    println!("Trigger for {handler:?} set to every {period} minutes");
                }
            }
        }
        TriggerCommands::Clear => {
            let handler = handler_name(args, cli).await?;
            let removed = registry.remove_all(&handler).await?;
            if !cli.quiet {
                println!("Removed {removed} trigger(s) for {handler:?}");
            }
        }
    }
    Ok(())
}
