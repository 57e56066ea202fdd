// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! SheetSync CLI - sync records from an HTTP API into a workbook.
//!
//! # Examples
//!
//! ```bash
//! # Configure the remote API
//! sheetsync config set API_URL https://records.example.com
//! sheetsync config set API_KEY $TOKEN
//! sheetsync config set ENDPOINTS '{"pets": "/pets", "owners": "/owners"}'
//!
//! # Run a sync now (full refresh)
//! sheetsync run
//!
//! # Incremental refresh, JSON output
//! sheetsync run --mode incremental --format json
//!
//! # Inspect the resolved configuration
//! sheetsync config show
//!
//! # Manage the recurring trigger
//! sheetsync trigger set --period 30
//! sheetsync trigger list
//!
//! # Run the scheduler in the foreground
//! sheetsync watch
//! ```

mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use sheetsync_store::properties::PropertyScope;
use sheetsync_store::{ConfigResolver, StoreError, TriggerRegistry};

use commands::{config, run, trigger, watch};

// ============================================================================
// CLI Definition
// ============================================================================

/// SheetSync CLI - API-to-workbook sync.
#[derive(Parser)]
#[command(name = "sheetsync")]
#[command(about = "Sync records from an HTTP API into a spreadsheet workbook")]
#[command(long_about = r#"
SheetSync pulls records from configured API endpoints and writes them
into a CSV-backed workbook, on demand or on a recurring trigger.

Configuration comes from two property scopes (script and user; user
wins on identical keys):

  API_URL, API_KEY, ENDPOINTS, SHEET_NAME,
  FULL_REFRESH_RANGE, INCREMENTAL_REFRESH_RANGE, TRIGGER_NAME

Examples:
  sheetsync run                  # Sync now, full refresh
  sheetsync run --mode incremental
  sheetsync watch                # Foreground scheduler
  sheetsync config show          # Resolved config, key redacted
  sheetsync trigger set --period 30
"#)]
#[command(version)]
#[command(author = "SheetSync Contributors")]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Workbook directory the sheets live in.
    #[arg(long, default_value = "workbook", global = true)]
    pub workbook: PathBuf,

    /// Script-scope properties file (defaults to ./sheetsync.properties.json).
    #[arg(long, global = true)]
    pub script_props: Option<PathBuf>,

    /// User-scope properties file (defaults to the user config dir).
    #[arg(long, global = true)]
    pub user_props: Option<PathBuf>,

    /// Trigger registry file (defaults to the user config dir).
    #[arg(long, global = true)]
    pub triggers: Option<PathBuf>,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Quiet mode (minimal output).
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,
}

impl Cli {
    /// Path of the given property scope, honoring overrides.
    pub fn scope_path(&self, scope: PropertyScope) -> PathBuf {
        let override_path = match scope {
            PropertyScope::Script => &self.script_props,
            PropertyScope::User => &self.user_props,
        };
        override_path
            .clone()
            .unwrap_or_else(|| scope.default_path())
    }

    /// Configuration resolver over the selected scope paths.
    pub fn resolver(&self) -> ConfigResolver {
        ConfigResolver::with_paths(
            self.scope_path(PropertyScope::Script),
            self.scope_path(PropertyScope::User),
        )
    }

    /// Trigger registry at the selected path.
    pub fn registry(&self) -> TriggerRegistry {
        self.triggers
            .as_ref()
            .map_or_else(TriggerRegistry::new, TriggerRegistry::with_path)
    }
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Run a sync now.
    #[command(visible_alias = "r")]
    Run(run::RunArgs),

    /// Run the trigger scheduler in the foreground.
    #[command(visible_alias = "w")]
    Watch(watch::WatchArgs),

    /// Manage configuration properties.
    Config(config::ConfigArgs),

    /// Manage recurring triggers.
    Trigger(trigger::TriggerArgs),
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text with colors.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// CLI exit codes.
#[repr(i32)]
pub enum ExitCode {
    /// Success.
    Success = 0,
    /// General error.
    Error = 1,
    /// Configuration is missing or invalid.
    Config = 2,
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return; // No logging in quiet mode
    }

    let filter = if verbose {
        EnvFilter::new("sheetsync=debug,info")
    } else {
        EnvFilter::new("sheetsync=warn")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Commands::Run(args) => run::run(args, &cli).await,
        Commands::Watch(args) => watch::run(args, &cli).await,
        Commands::Config(args) => config::run(args, &cli).await,
        Commands::Trigger(args) => trigger::run(args, &cli).await,
    };

    if let Err(e) = result {
        if !cli.quiet {
            eprintln!("Error: {e}");
        }
        let code = match e.downcast_ref::<StoreError>() {
            Some(store) if store.is_config() => ExitCode::Config,
            _ => ExitCode::Error,
        };
        std::process::exit(code as i32);
    }

    Ok(())
}
