//! Column letter and cell reference helpers
//!
//! Columns are 1-based: `A` = 1, `Z` = 26, `AA` = 27. Rows are 1-based too.

use crate::error::{SheetError, SheetResult};
use regex::Regex;
use std::sync::OnceLock;

/// Largest column an .xlsx sheet can address (`XFD`).
pub const MAX_COLUMN: u32 = 16_384;

fn column_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z]{1,3}$").expect("Hardcoded regex pattern"))
}

/// Convert a column letter (`"A"`, `"ab"`) to its 1-based number.
pub fn column_to_index(letters: &str) -> SheetResult<u32> {
    let letters = letters.trim();
    if !column_pattern().is_match(letters) {
        return Err(SheetError::InvalidReference(letters.to_string()));
    }

    let index = letters
        .chars()
        .map(|c| (c.to_ascii_uppercase() as u8 - b'A' + 1) as u32)
        .fold(0, |acc, digit| acc * 26 + digit);

    if index > MAX_COLUMN {
        return Err(SheetError::InvalidReference(letters.to_string()));
    }
    Ok(index)
}

/// Convert a 1-based column number to its letter (`1` -> `"A"`, `28` -> `"AB"`).
pub fn index_to_column(index: u32) -> String {
    let mut name = String::new();
    let mut n = index;

    while n > 0 {
        let remainder = (n - 1) % 26;
        name.insert(0, (b'A' + remainder as u8) as char);
        n = (n - 1) / 26;
    }

    name
}

/// Format an `A1`-style reference.
pub fn cell_reference(column: u32, row: u32) -> String {
    format!("{}{}", index_to_column(column), row)
}
