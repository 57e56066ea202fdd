//! Run command - one manual sync.

use anyhow::Result;
use clap::{Args, ValueEnum};

use sheetsync_core::RefreshMode;
use sheetsync_fetch::{ApiClient, SyncPipeline};
use sheetsync_sheet::{SheetWriter, Workbook};

use crate::output::{json, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the run command.
#[derive(Args)]
pub struct RunArgs {
    /// Write mode.
    #[arg(long, value_enum, default_value_t = ModeArg::Full)]
    pub mode: ModeArg,
}

/// Write mode options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum ModeArg {
    /// Clear the full-refresh range, then write at its origin.
    #[default]
    Full,
    /// Write at the incremental origin without clearing.
    Incremental,
}

impl From<ModeArg> for RefreshMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Full => RefreshMode::Full,
            ModeArg::Incremental => RefreshMode::Incremental,
        }
    }
}

/// Runs one sync and prints the report.
pub async fn run(args: &RunArgs, cli: &Cli) -> Result<()> {
    let config = cli.resolver().resolve().await?;

    let client = ApiClient::new()?;
    let pipeline = SyncPipeline::new(config.api_config(), client);
    let mut writer = SheetWriter::new(Workbook::open(&cli.workbook), config.sheet_ranges());
    let mut registry = cli.registry();

    let report = pipeline
        .run(
            &mut writer,
            &mut registry,
            config.trigger_name(),
            args.mode.into(),
        )
        .await?;

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_report(&report));
        }
        OutputFormat::Json => println!("{}", json::report(&report, cli.pretty)?),
    }

    Ok(())
}
