//! Cell grid collaborator
//!
//! The table layer only ever talks to a [`Grid`]. [`Workbook`] is the
//! in-memory implementation that the `.xlsx` importer fills and the exporter
//! drains.

mod workbook;

pub use workbook::{Sheet, Workbook};

use crate::error::SheetResult;
use crate::value::CellValue;

/// Addressable cell store, one 2-D grid per named sheet.
///
/// Columns and rows are 1-based. Reads of unknown sheets or empty cells
/// return `None`; every mutating call on an unknown sheet fails with
/// [`SheetError::UnknownSheet`](crate::error::SheetError::UnknownSheet).
pub trait Grid {
    /// Sheet names in workbook order.
    fn sheet_names(&self) -> Vec<String>;

    fn contains_sheet(&self, name: &str) -> bool {
        self.sheet_names().iter().any(|s| s == name)
    }

    fn create_sheet(&mut self, name: &str) -> SheetResult<()>;

    fn rename_sheet(&mut self, old: &str, new: &str) -> SheetResult<()>;

    fn delete_sheet(&mut self, name: &str) -> SheetResult<()>;

    fn cell(&self, sheet: &str, column: u32, row: u32) -> Option<&CellValue>;

    /// Writing blank text clears the cell.
    fn set_cell(&mut self, sheet: &str, column: u32, row: u32, value: CellValue)
        -> SheetResult<()>;

    fn clear_cell(&mut self, sheet: &str, column: u32, row: u32) -> SheetResult<()>;

    /// Remove a physical row; every row below moves up by one.
    fn delete_row(&mut self, sheet: &str, row: u32) -> SheetResult<()>;

    /// Last row holding a value, 0 for an empty or unknown sheet.
    fn max_row(&self, sheet: &str) -> u32;

    /// Last column holding a value, 0 for an empty or unknown sheet.
    fn max_column(&self, sheet: &str) -> u32;
}
