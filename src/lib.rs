//! sheetrows - header-aware rows over spreadsheet workbooks
//!
//! This library treats a worksheet as a table: the header row names the
//! columns, and rows are read and written by header instead of by cell
//! address.
//!
//! # Features
//!
//! - Header auto-detection, or an explicit header layout
//! - Row lookup by number or by exact value under a header
//! - Column-wise append, update-or-insert, and multi-row removal
//! - In-memory workbook with .xlsx import/export
//!
//! # Example
//!
//! ```no_run
//! use sheetrows::table::{AppendRecord, RowQuery, SheetTable};
//! use sheetrows::xlsx;
//!
//! let workbook = xlsx::open("people.xlsx")?;
//! let mut table = SheetTable::new(workbook);
//! table.find_headers()?;
//!
//! for row in table.get_rows(&RowQuery::search("NAME", "George")) {
//!     println!("{:?}: {:?}", row.row, row.data);
//! }
//!
//! table.append_rows(&[AppendRecord::new("NAME", "Amy")], None, true)?;
//! xlsx::save(table.grid(), "people.xlsx")?;
//! # Ok::<(), sheetrows::error::SheetError>(())
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod grid;
pub mod records;
pub mod reference;
pub mod table;
pub mod value;
pub mod xlsx;

// Re-export commonly used types
pub use config::TableConfig;
pub use error::{Reported, SheetError, SheetResult};
pub use grid::{Grid, Workbook};
pub use table::{AppendRecord, Column, HeaderSpec, RowQuery, RowResult, SheetTable, UpdateRecord};
pub use value::CellValue;
