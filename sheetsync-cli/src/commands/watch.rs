//! Watch command - foreground trigger scheduler.
//!
//! Ticks on a fixed cadence, reloading the trigger registry each tick
//! so `trigger set` from another terminal takes effect without a
//! restart. A due trigger whose handler matches the configured trigger
//! name fires a full-refresh sync; a failed firing is logged and the
//! loop keeps running, like any host scheduler would.

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::Args;
use std::collections::HashMap;
use tokio::time::{interval, Duration};
use tracing::{info, warn};

use sheetsync_core::RefreshMode;
use sheetsync_fetch::{ApiClient, SyncPipeline};
use sheetsync_sheet::{SheetWriter, Workbook};

use crate::output::TextFormatter;
use crate::Cli;

/// Arguments for the watch command.
#[derive(Args)]
pub struct WatchArgs {
    /// Seconds between scheduler ticks.
    #[arg(long, default_value = "60", value_parser = clap::value_parser!(u64).range(1..))]
    pub tick: u64,
}

/// Runs the scheduler loop.
pub async fn run(args: &WatchArgs, cli: &Cli) -> Result<()> {
    let config = cli.resolver().resolve().await?;
    let registry = cli.registry();
    let client = ApiClient::new()?;
    let pipeline = SyncPipeline::new(config.api_config(), client);
    let formatter = TextFormatter::new(!cli.no_color);

    info!(
        trigger = config.trigger_name(),
        tick_secs = args.tick,
        "Watch mode started"
    );
    if !cli.quiet {
        println!(
            "Watching triggers for {:?} (tick: {}s, Ctrl+C to exit)",
            config.trigger_name(),
            args.tick
        );
    }

    let mut last_fired: HashMap<String, DateTime<Utc>> = HashMap::new();
    let mut ticker = interval(Duration::from_secs(args.tick));

    loop {
        ticker.tick().await;

        let triggers = match registry.list().await {
            Ok(triggers) => triggers,
            Err(e) => {
                warn!(error = %e, "Failed to read trigger registry");
                continue;
            }
        };

        let now = Utc::now();
        for trigger in triggers {
            let due = trigger.next_due(last_fired.get(&trigger.handler).copied());
            if now < due {
                continue;
            }

            if trigger.handler == config.trigger_name() {
                info!(handler = %trigger.handler, "Firing scheduled sync");
                let mut writer =
                    SheetWriter::new(Workbook::open(&cli.workbook), config.sheet_ranges());
                let mut host = registry.clone();
                match pipeline
                    .run(
                        &mut writer,
                        &mut host,
                        config.trigger_name(),
                        RefreshMode::Full,
                    )
                    .await
                {
                    Ok(report) => {
                        if !cli.quiet {
                            println!("{}", formatter.format_report(&report));
                        }
                    }
                    Err(e) => {
                        warn!(handler = %trigger.handler, error = %e, "Scheduled sync failed");
                        if !cli.quiet {
                            eprintln!("Scheduled sync failed: {e}");
                        }
                    }
                }
            } else {
                warn!(handler = %trigger.handler, "No handler registered for trigger");
            }

            last_fired.insert(trigger.handler, now);
        }
    }
}
