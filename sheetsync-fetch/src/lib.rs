// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `SheetSync` Fetch
//!
//! HTTP fetching and the sync pipeline for the `SheetSync` application.
//!
//! - [`client::ApiClient`] - one HTTP call with method/header/payload/
//!   timeout options; non-2xx statuses are inspected after the call
//!   completes rather than treated as transport failures
//! - [`schema`] - required-key validation of decoded payloads
//! - [`pipeline::SyncPipeline`] - fetch every configured endpoint in
//!   order, aggregate the records, tabulate, write through the core
//!   `RowSink` seam, and ensure the recurring trigger exists
//!
//! The pipeline is generic over [`pipeline::EndpointFetch`], so tests
//! drive it with canned payloads instead of a live server.

pub mod client;
pub mod error;
pub mod pipeline;
pub mod schema;

pub use client::{ApiClient, CallOptions, Payload};
pub use error::FetchError;
pub use pipeline::{EndpointFetch, SyncPipeline};
pub use schema::require_keys;
