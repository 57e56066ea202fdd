//! Store error types.

use thiserror::Error;

use sheetsync_core::ConfigError;

/// Errors that can occur in the store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error surfaced during resolution.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl StoreError {
    /// Returns true when this error means the configuration itself is
    /// bad, as opposed to the machine being unable to read it.
    pub fn is_config(&self) -> bool {
        matches!(self, StoreError::Config(_))
    }
}
