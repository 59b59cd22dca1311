use thiserror::Error;

pub type SheetResult<T> = Result<T, SheetError>;

#[derive(Error, Debug)]
pub enum SheetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to read workbook: {0}")]
    Import(#[from] calamine::XlsxError),

    #[error("Failed to write workbook: {0}")]
    Export(#[from] rust_xlsxwriter::XlsxError),

    #[error("Sheet '{0}' does not exist")]
    UnknownSheet(String),

    #[error("No sheet is selected")]
    NoActiveSheet,

    #[error("Sheet '{0}' already exists")]
    DuplicateSheet(String),

    #[error("Header '{0}' does not exist on the current sheet")]
    UnknownHeader(String),

    #[error("Invalid column reference '{0}'")]
    InvalidReference(String),

    #[error("Malformed header layout at position(s) {}", positions(.0))]
    InvalidLayout(Vec<usize>),

    #[error("Malformed update record(s) at position(s) {}", positions(.0))]
    InvalidRecords(Vec<usize>),

    #[error("Invalid row selection: {0}")]
    InvalidRows(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// How a failure is meant to surface to the caller.
///
/// `Validation` failures happen before anything is written and are reported
/// as a `false` status by [`Reported::reported`]. `NotFound` is only raised
/// when strict header resolution is enabled. Everything else aborts the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Hard,
    Validation,
    NotFound,
}

impl SheetError {
    pub fn severity(&self) -> Severity {
        match self {
            SheetError::InvalidReference(_)
            | SheetError::InvalidLayout(_)
            | SheetError::InvalidRecords(_)
            | SheetError::InvalidRows(_) => Severity::Validation,
            SheetError::UnknownHeader(_) => Severity::NotFound,
            _ => Severity::Hard,
        }
    }

    pub fn is_validation(&self) -> bool {
        self.severity() == Severity::Validation
    }
}

fn positions(indices: &[usize]) -> String {
    indices
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Boolean status adapter for operations whose validation failures are
/// reported rather than raised.
pub trait Reported {
    fn reported(self) -> SheetResult<bool>;
}

impl Reported for SheetResult<()> {
    fn reported(self) -> SheetResult<bool> {
        match self {
            Ok(()) => Ok(true),
            Err(e) if e.is_validation() => {
                tracing::warn!("{}", e);
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }
}
