//! CLI command handlers

pub mod commands;

pub use commands::{
    append, build_query, create_sheet, delete_sheet, get, headers, remove, rename_sheet,
    set_headers, sheets, update, Session,
};
