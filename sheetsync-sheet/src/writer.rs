//! Block writes at the configured sheet ranges.

use serde_json::Value;
use tracing::{debug, info};

use sheetsync_core::{CoreError, RefreshMode, RowSink, SheetConfig};

use crate::error::SheetError;
use crate::range::RangeRef;
use crate::workbook::Workbook;

/// Writes rectangular row blocks into a workbook.
///
/// The write origin comes from one of two configured ranges: the
/// full-refresh range (cleared first) or the incremental range (written
/// over in place). Each write is one grid splice and one sheet save.
#[derive(Debug)]
pub struct SheetWriter {
    workbook: Workbook,
    config: SheetConfig,
}

impl SheetWriter {
    /// Creates a writer over `workbook` using the configured ranges.
    pub fn new(workbook: Workbook, config: SheetConfig) -> Self {
        Self { workbook, config }
    }

    /// Writes a block of rows, returning the row count written.
    ///
    /// Rows must be non-empty and rectangular; jagged input is rejected
    /// rather than written misaligned. The target sheet is created when
    /// it does not exist yet.
    pub fn write(&mut self, rows: &[Vec<Value>], mode: RefreshMode) -> Result<usize, SheetError> {
        if rows.is_empty() {
            return Err(SheetError::EmptyInput);
        }
        let width = rows[0].len();
        for (index, row) in rows.iter().enumerate().skip(1) {
            if row.len() != width {
                return Err(SheetError::JaggedRows {
                    row: index,
                    expected: width,
                    actual: row.len(),
                });
            }
        }

        let expr = match mode {
            RefreshMode::Full => &self.config.full_refresh_range,
            RefreshMode::Incremental => &self.config.incremental_refresh_range,
        };
        let range = RangeRef::parse(expr)?;
        let sheet_name = range.sheet.as_deref().unwrap_or(&self.config.sheet_name);

        if !self.workbook.sheet_exists(sheet_name) {
            info!(sheet = sheet_name, "Sheet does not exist, creating it");
        }
        let mut grid = self.workbook.load_sheet(sheet_name)?;

        if mode == RefreshMode::Full {
            grid.clear_rect(range.start, range.end);
        }

        let block: Vec<Vec<String>> = rows
            .iter()
            .map(|row| row.iter().map(render_cell).collect())
            .collect();
        grid.set_block(range.start, &block);

        self.workbook.save_sheet(sheet_name, &grid)?;
        debug!(
            sheet = sheet_name,
            rows = rows.len(),
            cols = width,
            mode = %mode,
            "Wrote block"
        );
        Ok(rows.len())
    }
}

impl RowSink for SheetWriter {
    fn write_rows(&mut self, rows: &[Vec<Value>], mode: RefreshMode) -> Result<usize, CoreError> {
        self.write(rows, mode)
            .map_err(|e| CoreError::Sink(e.to_string()))
    }
}

/// Renders one JSON value into a cell.
///
/// Strings go in verbatim, null becomes an empty cell, and nested
/// arrays/objects are kept as compact JSON.
fn render_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        nested => serde_json::to_string(nested).unwrap_or_default(),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range::CellRef;
    use serde_json::json;
    use tempfile::TempDir;

    fn writer_with(config: SheetConfig) -> (TempDir, SheetWriter) {
        let dir = TempDir::new().unwrap();
        let writer = SheetWriter::new(Workbook::open(dir.path()), config);
        (dir, writer)
    }

    fn test_config() -> SheetConfig {
        SheetConfig {
            sheet_name: "Records".to_string(),
            full_refresh_range: "A2:C4".to_string(),
            incremental_refresh_range: "A2".to_string(),
        }
    }

    #[test]
    fn rejects_empty_input() {
        let (_dir, mut writer) = writer_with(test_config());
        assert!(matches!(
            writer.write(&[], RefreshMode::Full),
            Err(SheetError::EmptyInput)
        ));
    }

    #[test]
    fn rejects_jagged_rows() {
        let (_dir, mut writer) = writer_with(test_config());
        let rows = vec![
            vec![json!("a"), json!("b")],
            vec![json!("c")],
        ];
        let err = writer.write(&rows, RefreshMode::Full).unwrap_err();
        match err {
            SheetError::JaggedRows {
                row,
                expected,
                actual,
            } => {
                assert_eq!(row, 1);
                assert_eq!(expected, 2);
                assert_eq!(actual, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn writes_block_at_full_refresh_origin() {
        let (dir, mut writer) = writer_with(test_config());
        let rows = vec![
            vec![json!("Rex"), json!("dog"), json!(4)],
            vec![json!("Mia"), json!("cat"), json!(7)],
        ];
        let written = writer.write(&rows, RefreshMode::Full).unwrap();
        assert_eq!(written, 2);

        let workbook = Workbook::open(dir.path());
        let grid = workbook.load_sheet("Records").unwrap();
        // Origin A2 = row index 1.
        assert_eq!(grid.cell(CellRef::new(1, 0)), "Rex");
        assert_eq!(grid.cell(CellRef::new(2, 2)), "7");
    }

    #[test]
    fn full_refresh_clears_stale_cells_in_range() {
        let (dir, mut writer) = writer_with(test_config());
        let first = vec![
            vec![json!("old1"), json!("x"), json!("y")],
            vec![json!("old2"), json!("x"), json!("y")],
            vec![json!("old3"), json!("x"), json!("y")],
        ];
        writer.write(&first, RefreshMode::Full).unwrap();

        let second = vec![vec![json!("new"), json!("a"), json!("b")]];
        writer.write(&second, RefreshMode::Full).unwrap();

        let grid = Workbook::open(dir.path()).load_sheet("Records").unwrap();
        assert_eq!(grid.cell(CellRef::new(1, 0)), "new");
        // Rows below the fresh block were cleared, not left stale.
        assert_eq!(grid.cell(CellRef::new(2, 0)), "");
        assert_eq!(grid.cell(CellRef::new(3, 0)), "");
    }

    #[test]
    fn incremental_refresh_leaves_cells_outside_block() {
        let (dir, mut writer) = writer_with(test_config());
        let first = vec![
            vec![json!("keep1"), json!("x"), json!("y")],
            vec![json!("keep2"), json!("x"), json!("y")],
        ];
        writer.write(&first, RefreshMode::Full).unwrap();

        let second = vec![vec![json!("over"), json!("a"), json!("b")]];
        writer.write(&second, RefreshMode::Incremental).unwrap();

        let grid = Workbook::open(dir.path()).load_sheet("Records").unwrap();
        assert_eq!(grid.cell(CellRef::new(1, 0)), "over");
        // Second data row survives an incremental write of one row.
        assert_eq!(grid.cell(CellRef::new(2, 0)), "keep2");
    }

    #[test]
    fn range_sheet_prefix_overrides_configured_name() {
        let mut config = test_config();
        config.full_refresh_range = "Archive!A1".to_string();
        let (dir, mut writer) = writer_with(config);

        writer
            .write(&[vec![json!("x")]], RefreshMode::Full)
            .unwrap();

        let workbook = Workbook::open(dir.path());
        assert!(workbook.sheet_exists("Archive"));
        assert!(!workbook.sheet_exists("Records"));
    }

    #[test]
    fn renders_values_into_cells() {
        assert_eq!(render_cell(&Value::Null), "");
        assert_eq!(render_cell(&json!("plain")), "plain");
        assert_eq!(render_cell(&json!(true)), "true");
        assert_eq!(render_cell(&json!(3.5)), "3.5");
        assert_eq!(render_cell(&json!({"a": 1})), "{\"a\":1}");
        assert_eq!(render_cell(&json!([1, 2])), "[1,2]");
    }
}
