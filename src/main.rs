use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use sheetrows::cli::{self, Session};
use sheetrows::config::TableConfig;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sheetrows")]
#[command(about = "Header-aware rows for .xlsx workbooks: search, append, update, remove.")]
#[command(long_about = "sheetrows - treat a worksheet as a table keyed by its header row

COMMANDS:
  sheets        - List sheets
  create-sheet  - Add a sheet
  rename-sheet  - Rename a sheet
  delete-sheet  - Delete a sheet
  headers       - Show the detected column layout
  set-headers   - Write an explicit header layout
  get           - Read a row by number, or rows by value
  append        - Append values column by column
  update        - Replace values, optionally inserting missing ones
  remove        - Delete rows and close the gaps

EXAMPLES:
  sheetrows get people.xlsx --header NAME --search George
  sheetrows append people.xlsx new_people.json --append-if-none false
  sheetrows remove people.xlsx 2 4 --sheet Sheet1

Mutating commands save the workbook in place. A file that does not exist
yet is treated as a new workbook with a single 'Sheet1'.")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Sheet to work on (default: first sheet)
    #[arg(short, long, global = true)]
    sheet: Option<String>,

    /// YAML configuration file (header_row, strict_headers)
    #[arg(short, long, global = true, env = "SHEETROWS_CONFIG")]
    config: Option<PathBuf>,

    /// Row holding the headers (overrides the config file)
    #[arg(long, global = true, env = "SHEETROWS_HEADER_ROW")]
    header_row: Option<u32>,

    /// Fail on records naming an unknown header instead of skipping them
    #[arg(long, global = true, env = "SHEETROWS_STRICT_HEADERS")]
    strict_headers: bool,

    /// Print JSON instead of formatted output
    #[arg(long, global = true)]
    json: bool,

    /// Log more (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// List sheets (the current one in bold)
    Sheets {
        /// Path to .xlsx file
        file: PathBuf,
    },

    /// Add a sheet
    CreateSheet {
        /// Path to .xlsx file
        file: PathBuf,

        /// Name of the new sheet
        name: String,
    },

    /// Rename a sheet
    RenameSheet {
        /// Path to .xlsx file
        file: PathBuf,

        /// Current sheet name
        old: String,

        /// New sheet name
        new: String,
    },

    /// Delete a sheet
    DeleteSheet {
        /// Path to .xlsx file
        file: PathBuf,

        /// Sheet to delete
        name: String,
    },

    /// Show the detected column layout
    Headers {
        /// Path to .xlsx file
        file: PathBuf,
    },

    #[command(long_about = "Write an explicit header layout.

LAYOUT is a JSON or YAML list of {header, index, start}:

  [{\"header\": \"NAME\", \"index\": \"A\", \"start\": 1},
   {\"header\": \"AGE\",  \"index\": \"B\", \"start\": 1}]

The whole layout is checked first. If any entry is malformed nothing is
written and the command prints 'false'.")]
    /// Write an explicit header layout
    SetHeaders {
        /// Path to .xlsx file
        file: PathBuf,

        /// JSON or YAML layout file
        layout: PathBuf,
    },

    /// Read a row by number, or every row whose value under a header matches
    Get {
        /// Path to .xlsx file
        file: PathBuf,

        /// Row number
        #[arg(long, conflicts_with_all = ["header", "search"])]
        row: Option<u32>,

        /// Header to search under
        #[arg(long, requires = "search")]
        header: Option<String>,

        /// Exact value to search for
        #[arg(long, requires = "header")]
        search: Option<String>,

        /// Parse the search value as a JSON literal (36 is a number, "36" text)
        #[arg(long)]
        typed: bool,
    },

    #[command(long_about = "Append values column by column.

RECORDS is a JSON or YAML list of {header, data} or {header, data, row}.
Each record advances only its own column. With --append-if-none false a
column holding only its header gets its first value right below it.")]
    /// Append values column by column
    Append {
        /// Path to .xlsx file
        file: PathBuf,

        /// JSON or YAML records file
        records: PathBuf,

        /// Leave a blank row before the first value of an empty column
        #[arg(long, default_value_t = true, action = ArgAction::Set)]
        append_if_none: bool,
    },

    #[command(long_about = "Replace values in place.

RECORDS is a JSON or YAML list of {header, old_data, new_data}. The first
row under header equal to old_data receives new_data. Prints 'false' and
writes nothing when any record is missing a key.")]
    /// Replace values, optionally inserting missing ones
    Update {
        /// Path to .xlsx file
        file: PathBuf,

        /// JSON or YAML records file
        records: PathBuf,

        /// Append new_data when old_data is not found
        #[arg(long, default_value_t = true, action = ArgAction::Set)]
        insert_if_not_found: bool,
    },

    /// Delete rows (numbered as before the call) and close the gaps
    Remove {
        /// Path to .xlsx file
        file: PathBuf,

        /// Row numbers
        #[arg(required = true)]
        rows: Vec<String>,
    },
}

impl Commands {
    fn file(&self) -> &Path {
        match self {
            Commands::Sheets { file }
            | Commands::CreateSheet { file, .. }
            | Commands::RenameSheet { file, .. }
            | Commands::DeleteSheet { file, .. }
            | Commands::Headers { file }
            | Commands::SetHeaders { file, .. }
            | Commands::Get { file, .. }
            | Commands::Append { file, .. }
            | Commands::Update { file, .. }
            | Commands::Remove { file, .. } => file,
        }
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "sheetrows=warn",
        1 => "sheetrows=info",
        _ => "sheetrows=debug",
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .init();
}

fn build_session(cli: &Cli) -> anyhow::Result<Session> {
    let mut config = match cli.config {
        Some(ref path) => TableConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => TableConfig::default(),
    };
    if let Some(header_row) = cli.header_row {
        config.header_row = header_row;
    }
    if cli.strict_headers {
        config.strict_headers = true;
    }
    config.validate()?;

    Ok(Session {
        sheet: cli.sheet.clone(),
        config,
        json: cli.json,
    })
}

fn run(command: Commands, session: &Session) -> sheetrows::SheetResult<()> {
    match command {
        Commands::Sheets { file } => cli::sheets(file, session),

        Commands::CreateSheet { file, name } => cli::create_sheet(file, name, session),

        Commands::RenameSheet { file, old, new } => cli::rename_sheet(file, old, new, session),

        Commands::DeleteSheet { file, name } => cli::delete_sheet(file, name, session),

        Commands::Headers { file } => cli::headers(file, session),

        Commands::SetHeaders { file, layout } => cli::set_headers(file, layout, session),

        Commands::Get {
            file,
            row,
            header,
            search,
            typed,
        } => cli::get(file, cli::build_query(row, header, search, typed), session),

        Commands::Append {
            file,
            records,
            append_if_none,
        } => cli::append(file, records, append_if_none, session),

        Commands::Update {
            file,
            records,
            insert_if_not_found,
        } => cli::update(file, records, insert_if_not_found, session),

        Commands::Remove { file, rows } => cli::remove(file, rows, session),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let session = build_session(&cli)?;
    let file = cli.command.file().to_path_buf();

    run(cli.command, &session).with_context(|| format!("sheetrows failed on {}", file.display()))
}
