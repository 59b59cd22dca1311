//! Excel importer implementation - Excel (.xlsx) -> Workbook

use crate::error::SheetResult;
use crate::grid::{Sheet, Workbook};
use crate::value::CellValue;
use calamine::{open_workbook, Data, Reader, Xlsx};
use std::path::{Path, PathBuf};

/// Reads the plain cell values of every worksheet.
pub struct XlsxImporter {
    path: PathBuf,
}

impl XlsxImporter {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn import(&self) -> SheetResult<Workbook> {
        let mut source: Xlsx<_> = open_workbook(&self.path)?;
        let mut workbook = Workbook::empty();

        for sheet_name in source.sheet_names().to_vec() {
            let range = source.worksheet_range(&sheet_name)?;
            let mut sheet = Sheet::new(sheet_name.clone());

            // used_cells() positions are relative to the range origin
            let (row_offset, col_offset) = range.start().unwrap_or((0, 0));
            for (row, col, data) in range.used_cells() {
                if let Some(value) = convert_cell(data) {
                    sheet.set(
                        col_offset + col as u32 + 1,
                        row_offset + row as u32 + 1,
                        value,
                    );
                }
            }

            tracing::debug!("imported sheet '{}' ({} rows)", sheet_name, sheet.max_row());
            workbook.push_sheet(sheet)?;
        }

        Ok(workbook)
    }
}

fn convert_cell(data: &Data) -> Option<CellValue> {
    match data {
        Data::Empty => None,
        Data::String(s) => Some(CellValue::Text(s.clone())),
        Data::Float(f) => Some(CellValue::Number(*f)),
        Data::Int(i) => Some(CellValue::Number(*i as f64)),
        Data::Bool(b) => Some(CellValue::Boolean(*b)),
        Data::DateTime(dt) => Some(CellValue::Number(dt.as_f64())),
        other => Some(CellValue::Text(other.to_string())),
    }
}
