use super::Grid;
use crate::error::{SheetError, SheetResult};
use crate::value::CellValue;
use std::collections::BTreeMap;

pub const DEFAULT_SHEET: &str = "Sheet1";

/// One named sheet. Cells are keyed by `(row, column)` so iteration runs
/// row-major.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sheet {
    pub name: String,
    cells: BTreeMap<(u32, u32), CellValue>,
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cells: BTreeMap::new(),
        }
    }

    /// Occupied cells as `(row, column, value)`, row-major.
    pub fn cells(&self) -> impl Iterator<Item = (u32, u32, &CellValue)> {
        self.cells.iter().map(|(&(row, col), value)| (row, col, value))
    }

    fn get(&self, column: u32, row: u32) -> Option<&CellValue> {
        self.cells.get(&(row, column))
    }

    /// Blank text clears the cell.
    pub fn set(&mut self, column: u32, row: u32, value: CellValue) {
        if value.is_blank() {
            self.cells.remove(&(row, column));
        } else {
            self.cells.insert((row, column), value);
        }
    }

    fn delete_row(&mut self, row: u32) {
        let below = self.cells.split_off(&(row, 0));
        for ((r, c), value) in below {
            if r > row {
                self.cells.insert((r - 1, c), value);
            }
        }
    }

    pub fn max_row(&self) -> u32 {
        self.cells.keys().next_back().map_or(0, |&(row, _)| row)
    }

    pub fn max_column(&self) -> u32 {
        self.cells.keys().map(|&(_, col)| col).max().unwrap_or(0)
    }
}

/// In-memory workbook: an ordered list of sheets.
#[derive(Debug, Clone, PartialEq)]
pub struct Workbook {
    sheets: Vec<Sheet>,
}

impl Default for Workbook {
    fn default() -> Self {
        Self::new()
    }
}

impl Workbook {
    /// A fresh workbook with a single empty `Sheet1`.
    pub fn new() -> Self {
        Self {
            sheets: vec![Sheet::new(DEFAULT_SHEET)],
        }
    }

    /// A workbook with no sheets at all; used by the importer.
    pub fn empty() -> Self {
        Self { sheets: Vec::new() }
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    /// Append an already populated sheet.
    pub fn push_sheet(&mut self, sheet: Sheet) -> SheetResult<()> {
        if self.contains_sheet(&sheet.name) {
            return Err(SheetError::DuplicateSheet(sheet.name));
        }
        self.sheets.push(sheet);
        Ok(())
    }

    fn sheet_mut(&mut self, name: &str) -> SheetResult<&mut Sheet> {
        self.sheets
            .iter_mut()
            .find(|s| s.name == name)
            .ok_or_else(|| SheetError::UnknownSheet(name.to_string()))
    }
}

impl Grid for Workbook {
    fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|s| s.name.clone()).collect()
    }

    fn contains_sheet(&self, name: &str) -> bool {
        self.sheet(name).is_some()
    }

    fn create_sheet(&mut self, name: &str) -> SheetResult<()> {
        self.push_sheet(Sheet::new(name))
    }

    fn rename_sheet(&mut self, old: &str, new: &str) -> SheetResult<()> {
        if old != new && self.contains_sheet(new) {
            return Err(SheetError::DuplicateSheet(new.to_string()));
        }
        self.sheet_mut(old)?.name = new.to_string();
        Ok(())
    }

    fn delete_sheet(&mut self, name: &str) -> SheetResult<()> {
        let position = self
            .sheets
            .iter()
            .position(|s| s.name == name)
            .ok_or_else(|| SheetError::UnknownSheet(name.to_string()))?;
        self.sheets.remove(position);
        Ok(())
    }

    fn cell(&self, sheet: &str, column: u32, row: u32) -> Option<&CellValue> {
        self.sheet(sheet)?.get(column, row)
    }

    fn set_cell(
        &mut self,
        sheet: &str,
        column: u32,
        row: u32,
        value: CellValue,
    ) -> SheetResult<()> {
        self.sheet_mut(sheet)?.set(column, row, value);
        Ok(())
    }

    fn clear_cell(&mut self, sheet: &str, column: u32, row: u32) -> SheetResult<()> {
        self.sheet_mut(sheet)?.cells.remove(&(row, column));
        Ok(())
    }

    fn delete_row(&mut self, sheet: &str, row: u32) -> SheetResult<()> {
        self.sheet_mut(sheet)?.delete_row(row);
        Ok(())
    }

    fn max_row(&self, sheet: &str) -> u32 {
        self.sheet(sheet).map_or(0, Sheet::max_row)
    }

    fn max_column(&self, sheet: &str) -> u32 {
        self.sheet(sheet).map_or(0, Sheet::max_column)
    }
}
