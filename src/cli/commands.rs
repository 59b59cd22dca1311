use crate::config::TableConfig;
use crate::error::{Reported, SheetResult};
use crate::grid::Workbook;
use crate::records;
use crate::table::{RowQuery, RowResult, SheetTable};
use crate::xlsx;
use colored::Colorize;
use std::path::{Path, PathBuf};

/// Options shared by every command.
#[derive(Debug, Clone, Default)]
pub struct Session {
    /// Sheet to work on; the workbook's first sheet when absent.
    pub sheet: Option<String>,
    pub config: TableConfig,
    /// Machine-readable output for `get`.
    pub json: bool,
}

/// Open the workbook and select the session's sheet, without locating
/// headers.
fn open_workbook(file: &Path, session: &Session) -> SheetResult<SheetTable<Workbook>> {
    let workbook = xlsx::open(file)?;
    let mut table = SheetTable::with_config(workbook, session.config.clone());
    if let Some(ref sheet) = session.sheet {
        table.set_sheet(sheet)?;
    }
    Ok(table)
}

/// Open the workbook, select the sheet and locate its headers.
fn open_table(file: &Path, session: &Session) -> SheetResult<SheetTable<Workbook>> {
    let mut table = open_workbook(file, session)?;
    table.find_headers()?;
    Ok(table)
}

fn save_table(table: &SheetTable<Workbook>, file: &Path) -> SheetResult<()> {
    xlsx::save(table.grid(), file)
}

fn print_status(ok: bool) {
    if ok {
        println!("{}", "true".bold().green());
    } else {
        println!("{}", "false".bold().red());
    }
}

fn sheet_label(table: &SheetTable<Workbook>) -> String {
    table.current_sheet().unwrap_or("-").to_string()
}

//==============================================================================
// Sheet commands
//==============================================================================

/// Execute the sheets command
pub fn sheets(file: PathBuf, session: &Session) -> SheetResult<()> {
    let table = open_workbook(&file, session)?;
    for name in table.get_sheets() {
        if Some(name.as_str()) == table.current_sheet() {
            println!("{}", name.bold());
        } else {
            println!("{}", name);
        }
    }
    Ok(())
}

/// Execute the create-sheet command
pub fn create_sheet(file: PathBuf, name: String, session: &Session) -> SheetResult<()> {
    let mut table = open_workbook(&file, session)?;
    table.create_sheet(&name)?;
    save_table(&table, &file)?;
    println!("{} Created sheet {}", "✅".green(), name.bright_blue().bold());
    Ok(())
}

/// Execute the rename-sheet command
pub fn rename_sheet(file: PathBuf, old: String, new: String, session: &Session) -> SheetResult<()> {
    let mut table = open_workbook(&file, session)?;
    table.rename_sheet(&old, &new)?;
    save_table(&table, &file)?;
    println!(
        "{} Renamed sheet {} -> {}",
        "✅".green(),
        old.bright_blue(),
        new.bright_blue().bold()
    );
    Ok(())
}

/// Execute the delete-sheet command
pub fn delete_sheet(file: PathBuf, name: String, session: &Session) -> SheetResult<()> {
    let mut table = open_workbook(&file, session)?;
    table.delete_sheet(&name)?;
    save_table(&table, &file)?;
    println!("{} Deleted sheet {}", "✅".green(), name.bright_blue().bold());
    Ok(())
}

//==============================================================================
// Header commands
//==============================================================================

/// Execute the headers command - show the auto-detected column layout
pub fn headers(file: PathBuf, session: &Session) -> SheetResult<()> {
    let table = open_table(&file, session)?;

    if session.json {
        println!("{}", serde_json::to_string_pretty(table.columns())?);
        return Ok(());
    }

    println!("{} {}", "📋 Headers on".bold().cyan(), sheet_label(&table).bold());
    for column in table.columns() {
        println!(
            "   {:>3}  {}  rows {}..={}",
            column.index,
            column.header.bright_blue(),
            column.start,
            column.end
        );
    }
    Ok(())
}

/// Execute the set-headers command
pub fn set_headers(file: PathBuf, layout: PathBuf, session: &Session) -> SheetResult<()> {
    let document = records::load_document(&layout)?;
    let mut table = open_workbook(&file, session)?;

    let ok = records::header_layout(&document)
        .and_then(|specs| table.set_headers(&specs))
        .reported()?;
    if ok {
        save_table(&table, &file)?;
    }
    print_status(ok);
    Ok(())
}

//==============================================================================
// Row commands
//==============================================================================

/// Build a query from the get command's flags.
pub fn build_query(
    row: Option<u32>,
    header: Option<String>,
    search: Option<String>,
    typed: bool,
) -> RowQuery {
    match (row, header, search) {
        (Some(row), _, _) => RowQuery::Row(row),
        (None, Some(header), Some(search)) => RowQuery::Search {
            header,
            search: records::value_from_arg(&search, typed),
        },
        _ => RowQuery::Unrecognized,
    }
}

/// Execute the get command
pub fn get(file: PathBuf, query: RowQuery, session: &Session) -> SheetResult<()> {
    let table = open_table(&file, session)?;
    let rows = table.get_rows(&query);

    if session.json {
        // serde_json::Value keeps object keys sorted
        println!("{}", serde_json::to_string_pretty(&serde_json::to_value(&rows)?)?);
        return Ok(());
    }

    print_rows(&table.get_headers(), &rows);
    Ok(())
}

fn print_rows(headers: &[String], rows: &[RowResult]) {
    for result in rows {
        let Some(row) = result.row else {
            println!("{}", "No matching row".yellow());
            continue;
        };
        println!("{}", format!("Row {}", row).bold().cyan());
        for header in headers {
            let value = result
                .get(header)
                .map(|v| v.to_string())
                .unwrap_or_default();
            println!("   {}: {}", header.bright_blue(), value);
        }
    }
}

/// Execute the append command
pub fn append(
    file: PathBuf,
    records_file: PathBuf,
    append_if_none: bool,
    session: &Session,
) -> SheetResult<()> {
    let document = records::load_document(&records_file)?;
    let mut table = open_table(&file, session)?;

    let ok = records::append_records(&document)
        .and_then(|batch| table.append_rows(&batch, None, append_if_none))
        .reported()?;
    if ok {
        save_table(&table, &file)?;
    }
    print_status(ok);
    Ok(())
}

/// Execute the update command
pub fn update(
    file: PathBuf,
    records_file: PathBuf,
    insert_if_not_found: bool,
    session: &Session,
) -> SheetResult<()> {
    let document = records::load_document(&records_file)?;
    let mut table = open_table(&file, session)?;

    let ok = records::update_records(&document)
        .and_then(|batch| table.update_rows(&batch, None, insert_if_not_found))
        .reported()?;
    if ok {
        save_table(&table, &file)?;
    }
    print_status(ok);
    Ok(())
}

/// Execute the remove command
pub fn remove(file: PathBuf, rows: Vec<String>, session: &Session) -> SheetResult<()> {
    let mut table = open_table(&file, session)?;

    let ok = records::row_list_from_args(&rows)
        .and_then(|rows| table.remove_rows(&rows, None))
        .reported()?;
    if ok {
        save_table(&table, &file)?;
    }
    print_status(ok);
    Ok(())
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
