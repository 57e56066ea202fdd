//! JSON output for scripting.

use sheetsync_core::SyncReport;
use sheetsync_store::Trigger;

/// Serializes a sync report.
pub fn report(report: &SyncReport, pretty: bool) -> Result<String, serde_json::Error> {
    if pretty {
        serde_json::to_string_pretty(report)
    } else {
        serde_json::to_string(report)
    }
}

/// Serializes the trigger listing.
pub fn triggers(triggers: &[Trigger], pretty: bool) -> Result<String, serde_json::Error> {
    if pretty {
        serde_json::to_string_pretty(triggers)
    } else {
        serde_json::to_string(triggers)
    }
}
