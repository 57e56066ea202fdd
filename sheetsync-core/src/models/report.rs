//! Sync run outcome types.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Write mode for a sync run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RefreshMode {
    /// Clear the configured full-refresh range, then write at its origin.
    #[default]
    Full,
    /// Write at the incremental origin without clearing first.
    Incremental,
}

impl std::fmt::Display for RefreshMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RefreshMode::Full => write!(f, "full"),
            RefreshMode::Incremental => write!(f, "incremental"),
        }
    }
}

/// Record of a single endpoint call within a sync run.
#[derive(Debug, Clone, Serialize)]
pub struct EndpointAttempt {
    /// Logical endpoint name.
    pub name: String,
    /// Relative path that was fetched.
    pub path: String,
    /// Records this endpoint contributed to the aggregate.
    pub records: usize,
    /// How long the call took.
    pub duration: Duration,
}

/// Outcome of a successful sync run.
#[derive(Debug, Clone, Serialize)]
pub struct SyncReport {
    /// Whether the run completed. Always true on a returned report;
    /// failed runs surface as errors instead.
    pub success: bool,
    /// Rows written to the sink.
    pub rows: usize,
    /// Write mode used.
    pub mode: RefreshMode,
    /// Per-endpoint call records, in fetch order.
    pub attempts: Vec<EndpointAttempt>,
    /// Total run duration.
    pub duration: Duration,
}
