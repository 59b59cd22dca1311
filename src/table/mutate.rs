use super::column::Column;
use super::SheetTable;
use crate::error::{SheetError, SheetResult};
use crate::grid::Grid;
use crate::reference::cell_reference;
use crate::value::CellValue;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// A value to place under `header`, at `row` when given, otherwise after the
/// column's last row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppendRecord {
    pub header: String,
    pub data: CellValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row: Option<u32>,
}

impl AppendRecord {
    pub fn new(header: impl Into<String>, data: impl Into<CellValue>) -> Self {
        Self {
            header: header.into(),
            data: data.into(),
            row: None,
        }
    }

    pub fn at_row(mut self, row: u32) -> Self {
        self.row = Some(row);
        self
    }
}

/// Replace `old_data` with `new_data` under `header`.
///
/// Keys are optional so a batch read from a document can be validated as a
/// whole; `update_rows` refuses a batch with any missing key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateRecord {
    pub header: Option<String>,
    pub old_data: Option<CellValue>,
    pub new_data: Option<CellValue>,
}

impl UpdateRecord {
    pub fn new(
        header: impl Into<String>,
        old_data: impl Into<CellValue>,
        new_data: impl Into<CellValue>,
    ) -> Self {
        Self {
            header: Some(header.into()),
            old_data: Some(old_data.into()),
            new_data: Some(new_data.into()),
        }
    }
}

struct Update<'a> {
    header: &'a str,
    old_data: &'a CellValue,
    new_data: &'a CellValue,
}

impl<G: Grid> SheetTable<G> {
    /// Append values column by column.
    ///
    /// Each record advances only its own column, so a batch that does not
    /// fill every column leaves the rows ragged. With `append_if_none` off, a
    /// column that only has its header receives its first value directly
    /// under the header instead of one row further down.
    ///
    /// An unknown header skips the record, or fails with
    /// [`SheetError::UnknownHeader`] when `strict_headers` is configured.
    /// Records written before a failure stay written.
    pub fn append_rows(
        &mut self,
        records: &[AppendRecord],
        sheet_name: Option<&str>,
        append_if_none: bool,
    ) -> SheetResult<()> {
        let malformed: Vec<usize> = records
            .iter()
            .enumerate()
            .filter(|(_, r)| r.row == Some(0))
            .map(|(i, _)| i)
            .collect();
        if !malformed.is_empty() {
            return Err(SheetError::InvalidRecords(malformed));
        }

        let sheet = self.resolve_sheet(sheet_name)?;
        let mut written = 0;

        for record in records {
            let Some(position) = self.header_position(&record.header)? else {
                continue;
            };
            let column = &self.columns.columns()[position];
            let row = match record.row {
                Some(row) => row,
                None => self.next_row(&sheet, column, append_if_none),
            };
            let number = column.number();

            self.grid.set_cell(&sheet, number, row, record.data.clone())?;
            self.columns.extend_to(position, row);
            written += 1;
            debug!("'{}'!{} <- {}", sheet, cell_reference(number, row), record.data);
        }

        info!("appended {}/{} record(s) on '{}'", written, records.len(), sheet);
        Ok(())
    }

    /// Replace values in place, searching each record's column for
    /// `old_data`. The first matching row is overwritten.
    ///
    /// When no row matches, `new_data` is appended to the column if
    /// `insert_if_not_found` is set and dropped otherwise. A batch with any
    /// record missing a key fails with [`SheetError::InvalidRecords`] before
    /// anything is written.
    pub fn update_rows(
        &mut self,
        records: &[UpdateRecord],
        sheet_name: Option<&str>,
        insert_if_not_found: bool,
    ) -> SheetResult<()> {
        let mut updates = Vec::with_capacity(records.len());
        let mut malformed = Vec::new();
        for (position, record) in records.iter().enumerate() {
            match (&record.header, &record.old_data, &record.new_data) {
                (Some(header), Some(old_data), Some(new_data)) => updates.push(Update {
                    header,
                    old_data,
                    new_data,
                }),
                _ => malformed.push(position),
            }
        }
        if !malformed.is_empty() {
            return Err(SheetError::InvalidRecords(malformed));
        }

        let sheet = self.resolve_sheet(sheet_name)?;

        for update in updates {
            let Some(position) = self.header_position(update.header)? else {
                continue;
            };
            let column = &self.columns.columns()[position];
            let number = column.number();
            let found = column
                .data_rows()
                .find(|&row| self.grid.cell(&sheet, number, row) == Some(update.old_data));

            match found {
                Some(row) => {
                    self.grid.set_cell(&sheet, number, row, update.new_data.clone())?;
                    debug!(
                        "'{}' row {}: {} -> {}",
                        update.header, row, update.old_data, update.new_data
                    );
                }
                None if insert_if_not_found => {
                    let row = self.next_row(&sheet, column, true);
                    self.grid.set_cell(&sheet, number, row, update.new_data.clone())?;
                    self.columns.extend_to(position, row);
                    debug!(
                        "'{}': {} not found, inserted at row {}",
                        update.header, update.old_data, row
                    );
                }
                None => {
                    debug!(
                        "'{}': {} not found, nothing written",
                        update.header, update.old_data
                    );
                }
            }
        }

        info!("processed {} update(s) on '{}'", records.len(), sheet);
        Ok(())
    }

    /// Delete physical rows, numbered as before the call.
    ///
    /// Rows are removed highest first so earlier deletions never renumber
    /// later ones; duplicates are ignored. Everything below a deleted row
    /// moves up. The column model is rebuilt afterwards.
    pub fn remove_rows(&mut self, rows: &[u32], sheet_name: Option<&str>) -> SheetResult<()> {
        if rows.contains(&0) {
            return Err(SheetError::InvalidRows(
                "row numbers start at 1".to_string(),
            ));
        }

        let sheet = self.resolve_sheet(sheet_name)?;

        let mut ordered = rows.to_vec();
        ordered.sort_unstable_by(|a, b| b.cmp(a));
        ordered.dedup();

        for &row in &ordered {
            self.grid.delete_row(&sheet, row)?;
        }

        info!("removed {} row(s) from '{}'", ordered.len(), sheet);
        self.find_headers()
    }

    /// Row a plain append writes to.
    ///
    /// After the last data row when the column has data. A header-only column
    /// gets its first value at `start + 1`, or at `start + 2` with
    /// `append_if_none`, unless that cell already holds a value the column
    /// does not cover.
    fn next_row(&self, sheet: &str, column: &Column, append_if_none: bool) -> u32 {
        if column.has_data() {
            return column.end + 1;
        }
        let lead = column.start + 2;
        if append_if_none && self.grid.cell(sheet, column.number(), lead).is_none() {
            lead
        } else {
            column.start + 1
        }
    }

    /// Column position for a record's header. `None` means skip the record.
    fn header_position(&self, header: &str) -> SheetResult<Option<usize>> {
        match self.columns.position(header) {
            Some(position) => Ok(Some(position)),
            None if self.config.strict_headers => {
                Err(SheetError::UnknownHeader(header.to_string()))
            }
            None => {
                debug!("header '{}' not found, record skipped", header);
                Ok(None)
            }
        }
    }
}
