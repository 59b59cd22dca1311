use super::column::{Column, ColumnModel};
use super::SheetTable;
use crate::error::{SheetError, SheetResult};
use crate::grid::Grid;
use crate::value::CellValue;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// One entry of an explicit header layout.
///
/// Every key is optional so a layout read from a document can be validated
/// as a whole; `set_headers` refuses a layout with any missing key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderSpec {
    pub header: Option<String>,
    pub index: Option<String>,
    pub start: Option<u32>,
}

impl HeaderSpec {
    pub fn new(header: impl Into<String>, index: impl Into<String>, start: u32) -> Self {
        Self {
            header: Some(header.into()),
            index: Some(index.into()),
            start: Some(start),
        }
    }

    fn to_column(&self) -> Option<Column> {
        let header = self.header.as_deref().filter(|h| !h.is_empty())?;
        let start = self.start.filter(|&s| s > 0)?;
        Column::new(header, self.index.as_deref()?, start).ok()
    }
}

/// Detect the columns of `sheet` from its header row.
///
/// Every non-empty cell of `header_row` becomes a column; its range ends at
/// the last row of the unbroken run of values directly below it.
pub fn scan_columns<G: Grid>(grid: &G, sheet: &str, header_row: u32) -> Vec<Column> {
    let mut columns = Vec::new();

    for col in 1..=grid.max_column(sheet) {
        let Some(label) = grid.cell(sheet, col, header_row) else {
            continue;
        };

        let mut end = header_row;
        while grid.cell(sheet, col, end + 1).is_some() {
            end += 1;
        }
        columns.push(Column::at(label.to_string(), col, header_row, end));
    }

    columns
}

impl<G: Grid> SheetTable<G> {
    /// Write an explicit header layout and rebuild the column model from it.
    ///
    /// The layout is validated in full first: if any spec is malformed
    /// nothing is written and the positions of all bad specs are returned in
    /// [`SheetError::InvalidLayout`].
    pub fn set_headers(&mut self, layout: &[HeaderSpec]) -> SheetResult<()> {
        let sheet = self.active_sheet()?;

        let mut columns = Vec::with_capacity(layout.len());
        let mut malformed = Vec::new();
        for (position, spec) in layout.iter().enumerate() {
            match spec.to_column() {
                Some(column) => columns.push(column),
                None => malformed.push(position),
            }
        }
        if !malformed.is_empty() {
            return Err(SheetError::InvalidLayout(malformed));
        }

        for column in &columns {
            self.grid.set_cell(
                &sheet,
                column.number(),
                column.start,
                CellValue::Text(column.header.clone()),
            )?;
        }

        info!("set {} header(s) on '{}'", columns.len(), sheet);
        self.columns = ColumnModel::new(columns);
        Ok(())
    }

    /// Rebuild the column model from the current sheet's header row.
    ///
    /// Safe to call repeatedly; each call replaces the previous model.
    pub fn find_headers(&mut self) -> SheetResult<()> {
        let sheet = self.active_sheet()?;
        let columns = scan_columns(&self.grid, &sheet, self.config.header_row);
        debug!(
            "found {} header(s) on '{}' row {}",
            columns.len(),
            sheet,
            self.config.header_row
        );
        self.columns = ColumnModel::new(columns);
        Ok(())
    }

    pub fn get_headers(&self) -> Vec<String> {
        self.columns.headers()
    }
}
