// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `SheetSync` Sheet
//!
//! Spreadsheet-style storage for the `SheetSync` application.
//!
//! A workbook is a directory of CSV files, one per sheet. Sheets are
//! loaded into in-memory grids, spliced, and saved back atomically.
//!
//! - [`range::RangeRef`] - A1-notation range parsing (`Sheet!A1:B10`)
//! - [`workbook::Workbook`] / [`workbook::Grid`] - CSV-backed cell grids
//! - [`writer::SheetWriter`] - block writes at the configured ranges;
//!   implements the core `RowSink` seam

pub mod error;
pub mod range;
pub mod workbook;
pub mod writer;

pub use error::SheetError;
pub use range::{CellRef, RangeRef};
pub use workbook::{Grid, Workbook};
pub use writer::SheetWriter;
