//! Text output formatting with colors.

use sheetsync_core::SyncReport;
use sheetsync_store::Trigger;

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";

/// Text formatter with optional colors.
pub struct TextFormatter {
    use_colors: bool,
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn paint(&self, color: &str, text: &str) -> String {
        if self.use_colors {
            format!("{color}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    /// Formats a sync report.
    ///
    /// One summary line, then one dimmed line per endpoint attempt.
    pub fn format_report(&self, report: &SyncReport) -> String {
        let mut lines = Vec::with_capacity(report.attempts.len() + 1);

        let check = self.paint(GREEN, "✓");
        let rows = plural(report.rows, "row", "rows");
        lines.push(format!(
            "{check} Synced {} {rows} ({} refresh) in {:.1}s",
            report.rows,
            report.mode,
            report.duration.as_secs_f64()
        ));

        for attempt in &report.attempts {
            let records = plural(attempt.records, "record", "records");
            let line = format!(
                "  {:<12} {:<20} {} {records} ({} ms)",
                attempt.name,
                attempt.path,
                attempt.records,
                attempt.duration.as_millis()
            );
            lines.push(self.paint(DIM, &line));
        }

        lines.join("\n")
    }

    /// Formats the trigger registry listing.
    pub fn format_triggers(&self, triggers: &[Trigger]) -> String {
        if triggers.is_empty() {
            return "No triggers registered.".to_string();
        }

        triggers
            .iter()
            .map(|t| {
                format!(
                    "{:<16} every {} min  (since {})",
                    t.handler,
                    t.period_minutes,
                    t.created_at.format("%Y-%m-%d %H:%M UTC")
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 {
        one
    } else {
        many
    }
}
