//! Core error types for `SheetSync`.

use thiserror::Error;

/// Errors raised while constructing or validating the configuration.
///
/// Any of these aborts startup; the process never runs with a
/// partially valid configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required field is missing or empty.
    #[error("Missing or empty configuration field: {0}")]
    MissingField(&'static str),

    /// The API base URL is not an http(s) URL.
    #[error("Invalid API URL {url:?}: {reason}")]
    InvalidApiUrl {
        /// The rejected URL string.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// An endpoint path failed validation.
    #[error("Invalid path {path:?} for endpoint {name:?}: {reason}")]
    InvalidEndpoint {
        /// The endpoint's configured name.
        name: String,
        /// The rejected path.
        path: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// An external property value could not be parsed.
    #[error("Malformed {key} property: {reason}")]
    MalformedProperty {
        /// The external property key.
        key: &'static str,
        /// Why parsing failed.
        reason: String,
    },

    /// Serialization error while layering configuration sources.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Error type crossing the [`crate::RowSink`] and [`crate::TriggerHost`] seams.
///
/// Implementing crates map their own error types into these variants so
/// the fetch pipeline stays ignorant of sheet and store internals.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Invalid data shape.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// The row sink rejected or failed a write.
    #[error("Sink error: {0}")]
    Sink(String),

    /// The trigger host failed to register or inspect a trigger.
    #[error("Scheduler error: {0}")]
    Scheduler(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}
