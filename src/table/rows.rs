use super::column::Column;
use super::SheetTable;
use crate::grid::Grid;
use crate::value::CellValue;
use serde::Serialize;
use std::collections::HashMap;

/// Header -> value of one row. Empty cells map to `None`.
pub type RowData = HashMap<String, Option<CellValue>>;

#[derive(Debug, Clone, PartialEq)]
pub enum RowQuery {
    /// The row with this 1-based number.
    Row(u32),
    /// Every row whose cell under `header` equals `search` exactly.
    Search { header: String, search: CellValue },
    /// Anything else; always answers with the absent marker.
    Unrecognized,
}

impl RowQuery {
    pub fn search(header: impl Into<String>, search: impl Into<CellValue>) -> Self {
        RowQuery::Search {
            header: header.into(),
            search: search.into(),
        }
    }
}

/// One row returned by [`SheetTable::get_rows`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowResult {
    pub row: Option<u32>,
    pub data: RowData,
}

impl RowResult {
    /// The "not found" marker: no row, no data.
    pub fn absent() -> Self {
        Self {
            row: None,
            data: HashMap::new(),
        }
    }

    pub fn is_absent(&self) -> bool {
        self.row.is_none()
    }

    pub fn get(&self, header: &str) -> Option<&CellValue> {
        self.data.get(header).and_then(Option::as_ref)
    }
}

impl<G: Grid> SheetTable<G> {
    /// Resolve a query into rows of the current sheet.
    ///
    /// Never fails and never returns an empty vector: when nothing matches
    /// (unknown header, row outside every column, no equal cell, malformed
    /// query) the answer is `[RowResult::absent()]`.
    pub fn get_rows(&self, query: &RowQuery) -> Vec<RowResult> {
        let rows = match query {
            RowQuery::Row(row) => self.row_by_number(*row).into_iter().collect(),
            RowQuery::Search { header, search } => self.rows_matching(header, search),
            RowQuery::Unrecognized => Vec::new(),
        };

        if rows.is_empty() {
            vec![RowResult::absent()]
        } else {
            rows
        }
    }

    fn row_by_number(&self, row: u32) -> Option<RowResult> {
        let sheet = self.current.as_deref()?;
        let columns = self.columns.columns();
        if !columns.iter().any(|c| c.contains_row(row)) {
            return None;
        }
        Some(self.read_row(sheet, row))
    }

    fn rows_matching(&self, header: &str, search: &CellValue) -> Vec<RowResult> {
        let Some(column) = self.columns.find(header) else {
            return Vec::new();
        };
        let Some(sheet) = self.current.as_deref() else {
            return Vec::new();
        };

        (column.start..=column.end)
            .filter(|&row| self.grid.cell(sheet, column.number(), row) == Some(search))
            .map(|row| self.read_row(sheet, row))
            .collect()
    }

    /// Values of every known column at `row`.
    fn read_row(&self, sheet: &str, row: u32) -> RowResult {
        let data = self
            .columns
            .columns()
            .iter()
            .map(|column: &Column| {
                let value = self.grid.cell(sheet, column.number(), row).cloned();
                (column.header.clone(), value)
            })
            .collect();

        RowResult {
            row: Some(row),
            data,
        }
    }
}
