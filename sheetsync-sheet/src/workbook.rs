//! CSV-backed workbook storage.
//!
//! A workbook is a directory holding one `<sheet>.csv` file per sheet.
//! Sheets load into [`Grid`]s, which support block splices and range
//! clears; saves go through a temp file and rename so a crashed write
//! never leaves a half-written sheet behind.

use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::SheetError;
use crate::range::CellRef;

// ============================================================================
// Grid
// ============================================================================

/// In-memory cell grid for one sheet.
///
/// Rows may have uneven widths internally (CSV files in the wild do);
/// cells addressed beyond the current extent read as empty and are
/// materialized on write.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<Vec<String>>,
}

impl Grid {
    /// Creates a grid from raw rows.
    pub fn from_rows(cells: Vec<Vec<String>>) -> Self {
        Self { cells }
    }

    /// All rows, outer = rows, inner = columns.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.cells
    }

    /// Number of rows currently materialized.
    pub fn height(&self) -> usize {
        self.cells.len()
    }

    /// Reads a cell; out-of-extent cells read as empty.
    pub fn cell(&self, at: CellRef) -> &str {
        self.cells
            .get(at.row as usize)
            .and_then(|row| row.get(at.col as usize))
            .map_or("", String::as_str)
    }

    /// Writes one cell, growing the grid as needed.
    pub fn set_cell(&mut self, at: CellRef, value: impl Into<String>) {
        let row = at.row as usize;
        let col = at.col as usize;
        if self.cells.len() <= row {
            self.cells.resize_with(row + 1, Vec::new);
        }
        let cells = &mut self.cells[row];
        if cells.len() <= col {
            cells.resize_with(col + 1, String::new);
        }
        cells[col] = value.into();
    }

    /// Splices a rectangular block with its top-left cell at `origin`.
    pub fn set_block(&mut self, origin: CellRef, block: &[Vec<String>]) {
        for (r, row) in block.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                #[allow(clippy::cast_possible_truncation)]
                let at = CellRef::new(origin.row + r as u32, origin.col + c as u32);
                self.set_cell(at, value.clone());
            }
        }
    }

    /// Blanks every cell in the rectangle from `start` to `end`.
    ///
    /// With no `end`, clears from `start` to the grid's current extent.
    /// Only materialized cells are touched; the grid never grows.
    pub fn clear_rect(&mut self, start: CellRef, end: Option<CellRef>) {
        for (r, row) in self.cells.iter_mut().enumerate() {
            if r < start.row as usize {
                continue;
            }
            if let Some(end) = end {
                if r > end.row as usize {
                    break;
                }
            }
            for (c, cell) in row.iter_mut().enumerate() {
                if c < start.col as usize {
                    continue;
                }
                if let Some(end) = end {
                    if c > end.col as usize {
                        break;
                    }
                }
                cell.clear();
            }
        }
    }
}

// ============================================================================
// Workbook
// ============================================================================

/// A directory of CSV sheets.
#[derive(Debug, Clone)]
pub struct Workbook {
    dir: PathBuf,
}

impl Workbook {
    /// Opens a workbook rooted at `dir`. The directory is created lazily
    /// on first save.
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The workbook's root directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of a sheet's backing file.
    pub fn sheet_path(&self, name: &str) -> Result<PathBuf, SheetError> {
        if name.is_empty()
            || name.contains('/')
            || name.contains('\\')
            || name.contains("..")
        {
            return Err(SheetError::InvalidSheetName(name.to_string()));
        }
        Ok(self.dir.join(format!("{name}.csv")))
    }

    /// Returns true when the sheet's backing file exists.
    pub fn sheet_exists(&self, name: &str) -> bool {
        self.sheet_path(name).map(|p| p.exists()).unwrap_or(false)
    }

    /// Loads a sheet into a grid. A missing sheet loads as an empty grid.
    pub fn load_sheet(&self, name: &str) -> Result<Grid, SheetError> {
        let path = self.sheet_path(name)?;
        if !path.exists() {
            debug!(sheet = name, "Sheet file not found, starting empty");
            return Ok(Grid::default());
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(&path)?;

        let mut cells = Vec::new();
        for result in reader.records() {
            let record = result?;
            cells.push(record.iter().map(str::to_string).collect());
        }

        debug!(sheet = name, rows = cells.len(), "Loaded sheet");
        Ok(Grid::from_rows(cells))
    }

    /// Saves a grid back to its sheet file, atomically.
    pub fn save_sheet(&self, name: &str, grid: &Grid) -> Result<(), SheetError> {
        let path = self.sheet_path(name)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        // Rows are padded to a uniform width: an all-empty row would
        // otherwise serialize as a blank line, which CSV readers skip,
        // shifting everything below it up by one on reload.
        let width = grid.rows().iter().map(Vec::len).max().unwrap_or(0).max(1);
        let empty = String::new();

        // Write to a temp file, then rename over the target.
        let temp_path = path.with_extension("csv.tmp");
        {
            let mut writer = csv::Writer::from_path(&temp_path)?;
            for row in grid.rows() {
                let padded = row.iter().chain(std::iter::repeat(&empty)).take(width);
                writer.write_record(padded)?;
            }
            writer.flush()?;
        }
        std::fs::rename(&temp_path, &path)?;

        debug!(sheet = name, rows = grid.height(), "Saved sheet");
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
