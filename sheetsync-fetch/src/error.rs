//! Fetch error types.

use thiserror::Error;

use sheetsync_core::CoreError;

/// Error type for fetch and sync-pipeline operations.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network-level failure: DNS, connection, or timeout.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The call completed with a status outside `[200, 300)`.
    ///
    /// The raw body is attached for diagnostics.
    #[error("HTTP {status}: {body}")]
    HttpStatus {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// The response body was not valid JSON.
    #[error("Invalid JSON in response: {0}")]
    Decode(#[source] serde_json::Error),

    /// The decoded payload is not a JSON object.
    #[error("Response is not a JSON object")]
    SchemaNotObject,

    /// The decoded payload is missing a required key.
    #[error("Response missing required key {0:?}")]
    SchemaMissingKey(String),

    /// The pipeline's configuration is unusable.
    #[error("Invalid fetch configuration: {0}")]
    Config(String),

    /// A request option (method or header) could not be encoded.
    #[error("Invalid request option: {0}")]
    InvalidOption(String),

    /// Error crossing the sink or scheduler seam.
    #[error(transparent)]
    Core(#[from] CoreError),
}
