//! Workbook file I/O
//!
//! - Import: .xlsx -> [`Workbook`] (plain values only)
//! - Export: [`Workbook`] -> .xlsx
//!
//! Styles, formulas and every other part of the file format are out of
//! scope; formulas come back as their cached values.

mod exporter;
mod importer;

pub use exporter::XlsxExporter;
pub use importer::XlsxImporter;

use crate::error::SheetResult;
use crate::grid::Workbook;
use std::path::Path;

/// Load a workbook, or start a fresh one when `path` does not exist yet.
pub fn open<P: AsRef<Path>>(path: P) -> SheetResult<Workbook> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::info!("{} does not exist, starting a new workbook", path.display());
        return Ok(Workbook::new());
    }
    XlsxImporter::new(path).import()
}

/// Write every sheet of `workbook` to `path`, replacing the file.
pub fn save<P: AsRef<Path>>(workbook: &Workbook, path: P) -> SheetResult<()> {
    XlsxExporter::new(workbook).export(path.as_ref())
}
