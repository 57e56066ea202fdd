// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `SheetSync` Store
//!
//! Persisted state for the `SheetSync` application:
//!
//! - [`properties`] - two external key→value scopes (script and user)
//!   that override the compiled-in defaults
//! - [`merge`] - external key translation plus value-level deep merge
//! - [`resolver::ConfigResolver`] - defaults → scopes → translate →
//!   merge → validate, producing the one immutable [`sheetsync_core::Config`]
//! - [`persistence`] - atomic JSON file I/O with restrictive permissions
//! - [`triggers::TriggerRegistry`] - the persisted recurring-trigger
//!   registry; implements the core `TriggerHost` seam

pub mod error;
pub mod merge;
pub mod persistence;
pub mod properties;
pub mod resolver;
pub mod triggers;

pub use error::StoreError;
pub use merge::{deep_merge, translate};
pub use properties::{PropertyScope, RECOGNIZED_KEYS};
pub use resolver::ConfigResolver;
pub use triggers::{Trigger, TriggerRegistry};
