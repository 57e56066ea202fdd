// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `SheetSync` Core
//!
//! Core types, models, and traits for the `SheetSync` application.
//!
//! This crate provides the foundational abstractions used across all other
//! `SheetSync` crates, including:
//!
//! - The typed, validated configuration object ([`Config`])
//! - Record and report models for a sync run
//! - Error types
//! - Trait definitions at the crate seams
//!
//! ## Key Types
//!
//! ### Configuration
//! - [`Config`] - Full application configuration, built once at startup
//! - [`ApiConfig`] - Remote API settings (base URL, key, endpoints)
//! - [`SheetConfig`] - Sheet name and write ranges
//! - [`Endpoints`] - Ordered endpoint list (document order is fetch order)
//!
//! ### Sync Models
//! - [`Record`] - One fetched record (field name → JSON value)
//! - [`Table`] - Rectangular value grid tabulated from records
//! - [`SyncReport`] - Outcome of a sync run with per-endpoint attempts
//! - [`RefreshMode`] - Full (clear first) vs incremental write mode
//!
//! ### Seams
//! - [`RowSink`] - Destination for tabulated rows
//! - [`TriggerHost`] - Owner of the recurring-trigger registry

pub mod config;
pub mod error;
pub mod models;
pub mod traits;

// Re-export configuration types
pub use config::{ApiConfig, Config, Endpoint, Endpoints, SheetConfig};

// Re-export error types
pub use error::{ConfigError, CoreError};

// Re-export model types
pub use models::{tabulate, EndpointAttempt, Record, RefreshMode, SyncReport, Table};

// Re-export traits
pub use traits::{RowSink, TriggerHost};
