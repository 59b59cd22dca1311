//! Excel exporter implementation - Workbook -> Excel (.xlsx)

use crate::error::{SheetError, SheetResult};
use crate::grid::{Sheet, Workbook};
use crate::reference::{cell_reference, MAX_COLUMN};
use crate::value::CellValue;
use rust_xlsxwriter::{Workbook as XlsxWorkbook, Worksheet};
use std::path::Path;

/// Writes every sheet of a [`Workbook`] as plain values, in workbook order.
pub struct XlsxExporter<'a> {
    workbook: &'a Workbook,
}

impl<'a> XlsxExporter<'a> {
    pub fn new(workbook: &'a Workbook) -> Self {
        Self { workbook }
    }

    pub fn export(&self, output_path: &Path) -> SheetResult<()> {
        let mut target = XlsxWorkbook::new();

        for sheet in self.workbook.sheets() {
            let worksheet = target.add_worksheet();
            worksheet.set_name(sheet.name.as_str())?;
            Self::export_sheet(worksheet, sheet)?;
        }

        target.save(output_path)?;
        tracing::info!(
            "saved {} sheet(s) to {}",
            self.workbook.sheets().len(),
            output_path.display()
        );
        Ok(())
    }

    fn export_sheet(worksheet: &mut Worksheet, sheet: &Sheet) -> SheetResult<()> {
        for (row, col, value) in sheet.cells() {
            if row == 0 || col == 0 || col > MAX_COLUMN {
                return Err(SheetError::InvalidReference(cell_reference(col, row)));
            }
            // rust_xlsxwriter is 0-based; MAX_COLUMN fits in u16
            let (row, col) = (row - 1, (col - 1) as u16);
            match value {
                CellValue::Text(s) => worksheet.write_string(row, col, s.as_str())?,
                CellValue::Number(n) => worksheet.write_number(row, col, *n)?,
                CellValue::Boolean(b) => worksheet.write_boolean(row, col, *b)?,
            };
        }
        Ok(())
    }
}
