//! SheetTable behaviour over an in-memory workbook

use pretty_assertions::assert_eq;
use sheetrows::error::{Reported, SheetError};
use sheetrows::grid::{Grid, Workbook};
use sheetrows::table::{AppendRecord, HeaderSpec, RowQuery, RowResult, SheetTable, UpdateRecord};
use sheetrows::{records, CellValue, TableConfig};
use serde_json::json;
use std::collections::HashMap;

fn text(s: &str) -> CellValue {
    CellValue::from(s)
}

/// Value at an `A1`-style address on the current sheet.
fn at(table: &SheetTable<Workbook>, column: u32, row: u32) -> Option<CellValue> {
    let sheet = table.current_sheet().unwrap();
    table.grid().cell(sheet, column, row).cloned()
}

fn row(number: u32, values: &[(&str, &str)]) -> RowResult {
    RowResult {
        row: Some(number),
        data: values
            .iter()
            .map(|(h, v)| (h.to_string(), Some(text(v))))
            .collect::<HashMap<_, _>>(),
    }
}

fn people() -> SheetTable<Workbook> {
    let mut table = SheetTable::new(Workbook::new());
    let rows = [
        ["NAME", "SURENAME", "AGE"],
        ["John", "Smith", "36"],
        ["George", "Simmons", "48"],
        ["George", "Hanks", "52"],
        ["AMY", "Beerhouse", "27"],
    ];
    for (r, cells) in rows.iter().enumerate() {
        for (c, value) in cells.iter().enumerate() {
            table
                .grid_mut()
                .set_cell("Sheet1", c as u32 + 1, r as u32 + 1, text(value))
                .unwrap();
        }
    }
    table.find_headers().unwrap();
    table
}

// ═══════════════════════════════════════════════════════════════════════════
// SHEET TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_sheet_lifecycle() {
    let mut table = SheetTable::new(Workbook::new());

    table.create_sheet("test_sheet").unwrap();
    assert_eq!(table.get_sheets(), vec!["Sheet1", "test_sheet"]);

    table.rename_sheet("Sheet1", "Sheet2").unwrap();
    assert_eq!(table.get_sheets(), vec!["Sheet2", "test_sheet"]);

    let err = table.rename_sheet("Sheet1", "Sheet2").unwrap_err();
    assert!(matches!(err, SheetError::UnknownSheet(_)));

    let err = table.set_sheet("Non existing").unwrap_err();
    assert!(matches!(err, SheetError::UnknownSheet(_)));

    table.delete_sheet("Sheet2").unwrap();
    assert_eq!(table.get_sheets(), vec!["test_sheet"]);

    let err = table.delete_sheet("Sheet3").unwrap_err();
    assert!(matches!(err, SheetError::UnknownSheet(_)));
}

// ═══════════════════════════════════════════════════════════════════════════
// HEADER TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_set_headers_with_missing_key_is_reported() {
    let mut table = SheetTable::new(Workbook::new());
    let layout = records::header_layout(&json!([
        {"non_existing": "test_header_1", "index": "A", "start": 1},
        {"header": "test_header_2", "index": "B", "start": 1}
    ]))
    .unwrap();

    let status = table.set_headers(&layout).reported().unwrap();

    assert!(!status);
    assert_eq!(at(&table, 2, 1), None);
}

#[test]
fn test_set_headers() {
    let mut table = SheetTable::new(Workbook::new());
    let status = table
        .set_headers(&[
            HeaderSpec::new("test_header_1", "A", 1),
            HeaderSpec::new("test_header_2", "B", 1),
        ])
        .reported()
        .unwrap();

    assert!(status);
    assert_eq!(at(&table, 1, 1), Some(text("test_header_1")));
    assert_eq!(at(&table, 2, 1), Some(text("test_header_2")));
}

#[test]
fn test_find_headers() {
    let mut table = SheetTable::new(Workbook::new());
    let grid = table.grid_mut();
    grid.set_cell("Sheet1", 1, 1, text("test_header_1")).unwrap();
    grid.set_cell("Sheet1", 1, 2, text("test_data_1")).unwrap();
    grid.set_cell("Sheet1", 2, 1, text("test_header_2")).unwrap();
    grid.set_cell("Sheet1", 2, 2, text("test_data_2")).unwrap();

    table.find_headers().unwrap();

    assert_eq!(table.columns().len(), 2);
    assert_eq!(table.columns()[0].header, "test_header_1");
    assert_eq!(table.columns()[0].start, 1);
    assert_eq!(table.columns()[0].end, 2);

    // locating headers does not touch the cells
    assert_eq!(at(&table, 1, 1), Some(text("test_header_1")));
    assert_eq!(at(&table, 1, 2), Some(text("test_data_1")));
    assert_eq!(at(&table, 1, 3), None);

    assert_eq!(table.get_headers(), vec!["test_header_1", "test_header_2"]);
}

#[test]
fn test_find_headers_twice_yields_same_model() {
    let mut table = people();
    let before = table.columns().to_vec();
    table.find_headers().unwrap();
    assert_eq!(table.columns(), before.as_slice());
}

#[test]
fn test_header_row_from_config() {
    let mut wb = Workbook::new();
    wb.set_cell("Sheet1", 1, 1, text("Quarterly report")).unwrap();
    wb.set_cell("Sheet1", 1, 2, text("NAME")).unwrap();
    wb.set_cell("Sheet1", 1, 3, text("John")).unwrap();

    let config = TableConfig::from_yaml("header_row: 2\n").unwrap();
    let mut table = SheetTable::with_config(wb, config);
    table.find_headers().unwrap();

    assert_eq!(
        table.get_rows(&RowQuery::search("NAME", "John")),
        vec![row(3, &[("NAME", "John")])]
    );
}

// ═══════════════════════════════════════════════════════════════════════════
// ROW TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_get_row_by_number() {
    let table = people();
    assert_eq!(
        table.get_rows(&RowQuery::Row(2)),
        vec![row(2, &[("NAME", "John"), ("SURENAME", "Smith"), ("AGE", "36")])]
    );
}

#[test]
fn test_get_empty_row() {
    let table = people();
    assert_eq!(table.get_rows(&RowQuery::Row(99)), vec![RowResult::absent()]);
}

#[test]
fn test_get_rows_by_search() {
    let table = people();
    let rows = table.get_rows(&RowQuery::search("NAME", "George"));
    assert_eq!(rows.len(), 2);
    assert_eq!(
        rows,
        vec![
            row(3, &[("NAME", "George"), ("SURENAME", "Simmons"), ("AGE", "48")]),
            row(4, &[("NAME", "George"), ("SURENAME", "Hanks"), ("AGE", "52")]),
        ]
    );
}

#[test]
fn test_get_rows_not_found_forms() {
    let table = people();
    let absent = vec![RowResult::absent()];

    assert_eq!(table.get_rows(&RowQuery::search("CITY", "NEW YORK")), absent);
    assert_eq!(table.get_rows(&RowQuery::search("NAME", "ANNA")), absent);

    let query = records::row_query(&json!({"non_existing": "some data", "search": "x"}));
    assert_eq!(table.get_rows(&query), absent);
}

#[test]
fn test_get_row_returns_last_written_value() {
    let mut table = people();
    table
        .append_rows(&[AppendRecord::new("AGE", "37").at_row(2)], None, true)
        .unwrap();
    let rows = table.get_rows(&RowQuery::Row(2));
    assert_eq!(rows[0].get("AGE"), Some(&text("37")));
}

#[test]
fn test_vehicles_scenario() {
    let mut table = people();

    table.create_sheet("vehicles").unwrap();
    table.grid_mut().set_cell("vehicles", 1, 1, text("AUTOMOBILES")).unwrap();
    table.grid_mut().set_cell("vehicles", 2, 1, text("MOTORBIKES")).unwrap();
    table.find_headers().unwrap();

    table
        .append_rows(&[AppendRecord::new("AUTOMOBILES", "BMW M3")], None, false)
        .unwrap();
    assert_eq!(at(&table, 1, 2), Some(text("BMW M3")));

    table
        .append_rows(&[AppendRecord::new("MOTORBIKES", "Hayabusa")], None, false)
        .unwrap();
    assert_eq!(at(&table, 2, 2), Some(text("Hayabusa")));

    // partial data fragments rows: only AUTOMOBILES moves on
    table
        .append_rows(&[AppendRecord::new("AUTOMOBILES", "Audi A3")], None, true)
        .unwrap();
    assert_eq!(at(&table, 1, 3), Some(text("Audi A3")));
    assert_eq!(at(&table, 2, 3), None);

    // unknown header: silently skipped
    table
        .append_rows(&[AppendRecord::new("PLANES", "Boeing 737")], None, true)
        .unwrap();
    assert_eq!(table.grid().max_column("vehicles"), 2);

    table
        .append_rows(
            &[AppendRecord::new("AUTOMOBILES", "Ford Escort").at_row(2)],
            Some("vehicles"),
            true,
        )
        .unwrap();
    assert_eq!(at(&table, 1, 2), Some(text("Ford Escort")));

    let malformed = records::update_records(&json!([
        {"non_existing": "PLANES", "data": "Boeing 737"}
    ]))
    .unwrap();
    let status = table
        .update_rows(&malformed, Some("vehicles"), true)
        .reported()
        .unwrap();
    assert!(!status);

    table
        .update_rows(
            &[UpdateRecord::new("AUTOMOBILES", "Ford Escort", "BMW M4")],
            Some("vehicles"),
            true,
        )
        .unwrap();
    assert_eq!(at(&table, 1, 2), Some(text("BMW M4")));

    table
        .update_rows(
            &[UpdateRecord::new("AUTOMOBILES", "Ferrari 488", "Alfa Romeo Giulia")],
            Some("vehicles"),
            true,
        )
        .unwrap();
    assert_eq!(at(&table, 1, 4), Some(text("Alfa Romeo Giulia")));

    table
        .update_rows(
            &[UpdateRecord::new("AUTOMOBILES", "Ferrari 488", "Ferrari F40")],
            Some("vehicles"),
            false,
        )
        .unwrap();
    assert_eq!(at(&table, 1, 5), None);

    let status = records::row_list(&json!("wrong_type"))
        .and_then(|rows| table.remove_rows(&rows, Some("vehicles")))
        .reported()
        .unwrap();
    assert!(!status);

    // the first sheet is still intact
    table.set_sheet("Sheet1").unwrap();
    assert_eq!(at(&table, 1, 2), Some(text("John")));

    table.remove_rows(&[2, 4], Some("Sheet1")).unwrap();
    assert_eq!(at(&table, 1, 1), Some(text("NAME")));
    assert_eq!(at(&table, 1, 2), Some(text("George")));
    assert_eq!(at(&table, 1, 3), Some(text("AMY")));
    assert_eq!(at(&table, 2, 2), Some(text("Simmons")));
    assert_eq!(at(&table, 2, 3), Some(text("Beerhouse")));

    // naming another sheet switches to it
    table
        .append_rows(
            &[AppendRecord::new("AUTOMOBILES", "Nissan Skyline")],
            Some("vehicles"),
            true,
        )
        .unwrap();
    assert_eq!(table.current_sheet(), Some("vehicles"));
    assert_eq!(at(&table, 1, 5), Some(text("Nissan Skyline")));

    table
        .append_rows(&[AppendRecord::new("CITY", "London")], Some("Sheet1"), true)
        .unwrap();
    let err = table
        .append_rows(&[AppendRecord::new("CITY", "London")], Some("countries"), true)
        .unwrap_err();
    assert!(matches!(err, SheetError::UnknownSheet(_)));
}

#[test]
fn test_update_insert_creates_exactly_one_row() {
    let mut table = people();
    table
        .update_rows(&[UpdateRecord::new("NAME", "ANNA", "Anna")], None, true)
        .unwrap();
    assert_eq!(at(&table, 1, 6), Some(text("Anna")));
    assert_eq!(at(&table, 1, 7), None);
    assert_eq!(table.grid().max_row("Sheet1"), 6);

    table
        .update_rows(&[UpdateRecord::new("NAME", "BOB", "Bob")], None, false)
        .unwrap();
    assert_eq!(table.grid().max_row("Sheet1"), 6);
}

#[test]
fn test_remove_rows_compacts_every_column() {
    let mut table = people();
    table.remove_rows(&[2, 4], None).unwrap();

    assert_eq!(
        table.get_rows(&RowQuery::Row(2)),
        vec![row(2, &[("NAME", "George"), ("SURENAME", "Simmons"), ("AGE", "48")])]
    );
    assert_eq!(
        table.get_rows(&RowQuery::Row(3)),
        vec![row(3, &[("NAME", "AMY"), ("SURENAME", "Beerhouse"), ("AGE", "27")])]
    );
    assert_eq!(table.get_rows(&RowQuery::Row(4)), vec![RowResult::absent()]);
}

#[test]
fn test_strict_headers_reject_unknown_header() {
    let mut wb = Workbook::new();
    wb.set_cell("Sheet1", 1, 1, text("NAME")).unwrap();
    let config = TableConfig {
        strict_headers: true,
        ..TableConfig::default()
    };
    let mut table = SheetTable::with_config(wb, config);
    table.find_headers().unwrap();

    let err = table
        .append_rows(&[AppendRecord::new("CITY", "London")], None, true)
        .unwrap_err();
    assert!(matches!(err, SheetError::UnknownHeader(_)));
    // not a validation failure, so it is raised rather than reported
    assert!(table
        .append_rows(&[AppendRecord::new("CITY", "London")], None, true)
        .reported()
        .is_err());
}
