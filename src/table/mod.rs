//! Header-aware row access over a [`Grid`]
//!
//! [`SheetTable`] tracks the current sheet and its [`ColumnModel`]. Locate
//! headers first (`find_headers` or `set_headers`), then read and mutate rows
//! by header instead of by cell address.
//!
//! Switching sheets clears the column model. Row operations that take a sheet
//! name switch to it and locate its headers before running.

mod column;
mod headers;
mod mutate;
mod rows;

pub use column::{Column, ColumnModel};
pub use headers::{scan_columns, HeaderSpec};
pub use mutate::{AppendRecord, UpdateRecord};
pub use rows::{RowData, RowQuery, RowResult};

use crate::config::TableConfig;
use crate::error::{SheetError, SheetResult};
use crate::grid::Grid;
use tracing::debug;

pub struct SheetTable<G: Grid> {
    grid: G,
    current: Option<String>,
    columns: ColumnModel,
    config: TableConfig,
}

impl<G: Grid> SheetTable<G> {
    /// Wrap a grid, selecting its first sheet.
    pub fn new(grid: G) -> Self {
        Self::with_config(grid, TableConfig::default())
    }

    pub fn with_config(grid: G, config: TableConfig) -> Self {
        let current = grid.sheet_names().into_iter().next();
        Self {
            grid,
            current,
            columns: ColumnModel::default(),
            config,
        }
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn current_sheet(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Column model of the current sheet, as of the last header pass.
    pub fn columns(&self) -> &[Column] {
        self.columns.columns()
    }

    pub fn grid(&self) -> &G {
        &self.grid
    }

    /// Direct grid access. Writes made here are not reflected in the column
    /// model until [`SheetTable::find_headers`] runs again.
    pub fn grid_mut(&mut self) -> &mut G {
        &mut self.grid
    }

    pub fn into_grid(self) -> G {
        self.grid
    }

    //==========================================================================
    // Sheet pass-throughs
    //==========================================================================

    pub fn get_sheets(&self) -> Vec<String> {
        self.grid.sheet_names()
    }

    /// Create a sheet and select it.
    pub fn create_sheet(&mut self, name: &str) -> SheetResult<()> {
        self.grid.create_sheet(name)?;
        debug!("created sheet '{}'", name);
        self.select(name.to_string());
        Ok(())
    }

    pub fn rename_sheet(&mut self, old: &str, new: &str) -> SheetResult<()> {
        self.grid.rename_sheet(old, new)?;
        if self.current.as_deref() == Some(old) {
            self.current = Some(new.to_string());
        }
        debug!("renamed sheet '{}' to '{}'", old, new);
        Ok(())
    }

    /// Delete a sheet. Deleting the current sheet selects the first remaining
    /// one.
    pub fn delete_sheet(&mut self, name: &str) -> SheetResult<()> {
        self.grid.delete_sheet(name)?;
        if self.current.as_deref() == Some(name) {
            self.current = self.grid.sheet_names().into_iter().next();
            self.columns = ColumnModel::default();
        }
        debug!("deleted sheet '{}'", name);
        Ok(())
    }

    pub fn set_sheet(&mut self, name: &str) -> SheetResult<()> {
        if !self.grid.contains_sheet(name) {
            return Err(SheetError::UnknownSheet(name.to_string()));
        }
        self.select(name.to_string());
        Ok(())
    }

    fn select(&mut self, name: String) {
        self.current = Some(name);
        self.columns = ColumnModel::default();
    }

    /// Name of the current sheet, which must still exist in the grid.
    pub(crate) fn active_sheet(&self) -> SheetResult<String> {
        match &self.current {
            Some(name) if self.grid.contains_sheet(name) => Ok(name.clone()),
            Some(name) => Err(SheetError::UnknownSheet(name.clone())),
            None => Err(SheetError::NoActiveSheet),
        }
    }

    /// Sheet targeted by a row operation. Naming another sheet selects it and
    /// locates its headers; so does naming the current sheet while no headers
    /// are known.
    pub(crate) fn resolve_sheet(&mut self, sheet_name: Option<&str>) -> SheetResult<String> {
        match sheet_name {
            Some(name)
                if self.current.as_deref() != Some(name) || self.columns.is_empty() =>
            {
                self.set_sheet(name)?;
                self.find_headers()?;
                Ok(name.to_string())
            }
            _ => self.active_sheet(),
        }
    }
}
