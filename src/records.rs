//! Loosely shaped input documents
//!
//! Layouts, record batches, queries and row lists usually arrive as JSON or
//! YAML. These helpers turn a parsed [`Value`] into the typed inputs of
//! [`SheetTable`](crate::table::SheetTable), keeping each operation's
//! contract for bad shapes:
//!
//! - layouts and update batches: per-record shape problems surface in
//!   `set_headers` / `update_rows` as validation errors
//! - queries: anything unrecognized becomes [`RowQuery::Unrecognized`]
//! - row lists: anything but a list of positive integers is a validation
//!   error

use crate::error::{SheetError, SheetResult};
use crate::table::{AppendRecord, HeaderSpec, RowQuery, UpdateRecord};
use crate::value::CellValue;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::path::Path;

/// Read a JSON or YAML document; `.yaml` / `.yml` select YAML.
pub fn load_document(path: &Path) -> SheetResult<Value> {
    let content = std::fs::read_to_string(path)?;
    let is_yaml = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"));
    parse_document(&content, is_yaml)
}

pub fn parse_document(content: &str, is_yaml: bool) -> SheetResult<Value> {
    if is_yaml {
        Ok(serde_yaml::from_str(content)?)
    } else {
        Ok(serde_json::from_str(content)?)
    }
}

/// Decode each element of a list. A non-list, or any element that does not
/// decode, is reported with the failing positions.
fn decode_list<T: DeserializeOwned>(
    value: &Value,
    invalid: fn(Vec<usize>) -> SheetError,
) -> SheetResult<Vec<T>> {
    let Value::Array(items) = value else {
        return Err(invalid(Vec::new()));
    };

    let mut decoded = Vec::with_capacity(items.len());
    let mut malformed = Vec::new();
    for (position, item) in items.iter().enumerate() {
        match item {
            Value::Object(_) => match serde_json::from_value(item.clone()) {
                Ok(record) => decoded.push(record),
                Err(_) => malformed.push(position),
            },
            _ => malformed.push(position),
        }
    }

    if malformed.is_empty() {
        Ok(decoded)
    } else {
        Err(invalid(malformed))
    }
}

/// Header layout. Missing keys are kept as `None` for `set_headers` to judge.
pub fn header_layout(value: &Value) -> SheetResult<Vec<HeaderSpec>> {
    decode_list(value, SheetError::InvalidLayout)
}

/// Update batch. Missing keys are kept as `None` for `update_rows` to judge.
pub fn update_records(value: &Value) -> SheetResult<Vec<UpdateRecord>> {
    decode_list(value, SheetError::InvalidRecords)
}

pub fn append_records(value: &Value) -> SheetResult<Vec<AppendRecord>> {
    decode_list(value, SheetError::InvalidRecords)
}

/// `{"row": n}` or `{"header": h, "search": v}`; anything else is
/// [`RowQuery::Unrecognized`].
pub fn row_query(value: &Value) -> RowQuery {
    let Value::Object(map) = value else {
        return RowQuery::Unrecognized;
    };

    if let Some(row) = map.get("row").and_then(Value::as_u64) {
        return u32::try_from(row).map_or(RowQuery::Unrecognized, RowQuery::Row);
    }

    let header = map.get("header").and_then(Value::as_str);
    let search = map
        .get("search")
        .and_then(|v| serde_json::from_value::<CellValue>(v.clone()).ok());
    match (header, search) {
        (Some(header), Some(search)) => RowQuery::Search {
            header: header.to_string(),
            search,
        },
        _ => RowQuery::Unrecognized,
    }
}

/// A list of 1-based row numbers.
pub fn row_list(value: &Value) -> SheetResult<Vec<u32>> {
    let Value::Array(items) = value else {
        return Err(SheetError::InvalidRows(format!("expected a list, got {}", value)));
    };

    items
        .iter()
        .map(|item| {
            item.as_u64()
                .and_then(|n| u32::try_from(n).ok())
                .filter(|&n| n > 0)
                .ok_or_else(|| SheetError::InvalidRows(format!("'{}' is not a row number", item)))
        })
        .collect()
}

/// Row numbers given as command-line words.
pub fn row_list_from_args<S: AsRef<str>>(args: &[S]) -> SheetResult<Vec<u32>> {
    args.iter()
        .map(|arg| {
            let arg = arg.as_ref();
            arg.trim()
                .parse::<u32>()
                .ok()
                .filter(|&n| n > 0)
                .ok_or_else(|| SheetError::InvalidRows(format!("'{}' is not a row number", arg)))
        })
        .collect()
}

/// A value given on the command line. With `typed`, JSON literals keep their
/// type (`36` is a number, `true` a boolean); otherwise it is text.
pub fn value_from_arg(arg: &str, typed: bool) -> CellValue {
    if typed {
        if let Ok(value) = serde_json::from_str::<CellValue>(arg) {
            return value;
        }
    }
    CellValue::Text(arg.to_string())
}
