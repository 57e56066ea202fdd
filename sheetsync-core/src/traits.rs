//! Trait definitions at the crate seams.
//!
//! The fetch pipeline talks to the sheet and store crates exclusively
//! through these traits, which keeps it testable with in-memory stubs.

use serde_json::Value;

use crate::error::CoreError;
use crate::models::RefreshMode;

/// Destination for tabulated rows.
///
/// Implementors are responsible for resolving the configured target and
/// performing the write as a single block operation. The input is
/// expected to be rectangular; implementors may reject jagged input.
pub trait RowSink {
    /// Writes a block of rows, returning the row count written.
    fn write_rows(&mut self, rows: &[Vec<Value>], mode: RefreshMode) -> Result<usize, CoreError>;
}

/// Owner of the recurring-trigger registry.
pub trait TriggerHost {
    /// Guarantees a recurring trigger exists for `handler`.
    ///
    /// Idempotent: a no-op when a trigger for `handler` already exists.
    fn ensure(
        &mut self,
        handler: &str,
    ) -> impl std::future::Future<Output = Result<(), CoreError>> + Send;
}
