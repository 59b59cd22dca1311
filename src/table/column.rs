use crate::error::SheetResult;
use crate::reference::{column_to_index, index_to_column};
use serde::Serialize;
use std::ops::RangeInclusive;

/// One logical column: a header label bound to a sheet column and the row
/// range `[start, end]` it occupies. `start` is the header row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    pub header: String,
    /// Column letter, upper case.
    pub index: String,
    pub start: u32,
    pub end: u32,
    #[serde(skip)]
    number: u32,
}

impl Column {
    pub fn new(header: impl Into<String>, index: &str, start: u32) -> SheetResult<Self> {
        let number = column_to_index(index)?;
        Ok(Self::at(header, number, start, start))
    }

    /// Build from a 1-based column number.
    pub fn at(header: impl Into<String>, number: u32, start: u32, end: u32) -> Self {
        Self {
            header: header.into(),
            index: index_to_column(number),
            start,
            end: end.max(start),
            number,
        }
    }

    /// 1-based column number.
    pub fn number(&self) -> u32 {
        self.number
    }

    /// True once at least one row under the header is part of the range.
    pub fn has_data(&self) -> bool {
        self.end > self.start
    }

    pub fn contains_row(&self, row: u32) -> bool {
        (self.start..=self.end).contains(&row)
    }

    /// Rows below the header that belong to the column.
    pub fn data_rows(&self) -> RangeInclusive<u32> {
        (self.start + 1)..=self.end
    }
}

/// Ordered columns of the current sheet, left to right.
///
/// This is recomputed state, not a view: writes that bypass the table
/// desynchronize it until headers are located again.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnModel {
    columns: Vec<Column>,
}

impl ColumnModel {
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn headers(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.header.clone()).collect()
    }

    /// Position of the first column labelled `header`.
    pub fn position(&self, header: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.header == header)
    }

    pub fn find(&self, header: &str) -> Option<&Column> {
        self.position(header).map(|i| &self.columns[i])
    }

    /// Grow a column's range after a write at `row`. Never shrinks.
    pub(crate) fn extend_to(&mut self, position: usize, row: u32) {
        if let Some(column) = self.columns.get_mut(position) {
            column.end = column.end.max(row);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_column_is_empty() {
        let column = Column::new("NAME", "b", 1).unwrap();
        assert_eq!(column.index, "B");
        assert_eq!(column.number(), 2);
        assert_eq!((column.start, column.end), (1, 1));
        assert!(!column.has_data());
        assert!(column.data_rows().is_empty());
    }

    #[test]
    fn test_new_column_rejects_bad_index() {
        assert!(Column::new("NAME", "1A", 1).is_err());
    }

    #[test]
    fn test_extend_never_shrinks() {
        let mut model = ColumnModel::new(vec![Column::at("NAME", 1, 1, 4)]);
        model.extend_to(0, 2);
        assert_eq!(model.columns()[0].end, 4);
        model.extend_to(0, 6);
        assert_eq!(model.columns()[0].end, 6);
        assert_eq!(model.columns()[0].data_rows(), 2..=6);
    }

    #[test]
    fn test_duplicate_headers_resolve_to_first() {
        let model = ColumnModel::new(vec![
            Column::at("NAME", 1, 1, 1),
            Column::at("NAME", 3, 1, 1),
        ]);
        assert_eq!(model.find("NAME").unwrap().index, "A");
        assert_eq!(model.headers(), vec!["NAME", "NAME"]);
    }
}
