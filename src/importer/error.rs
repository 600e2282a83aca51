// ==========================================
// GST Billing Core - Import Error Types
// ==========================================
// Tooling: thiserror derive macro
// ==========================================

use thiserror::Error;

/// Import pipeline error type.
///
/// Parse-time errors are terminal for the import attempt: the first failing
/// row aborts the whole file and no partial batch is surfaced.
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== File errors =====
    #[error("file not found: {0}")]
    FileNotFound(String),

    #[error("unsupported file format: {0} (expected .xlsx/.xls/.csv)")]
    UnsupportedFormat(String),

    #[error("failed to read file: {0}")]
    FileReadError(String),

    #[error("Excel parse failure: {0}")]
    ExcelParseError(String),

    #[error("CSV parse failure: {0}")]
    CsvParseError(String),

    // ===== Row validation =====
    // Row numbers are 1-based spreadsheet rows; the header is row 1, so the
    // first data row reports as row 2. The message names the offending
    // field(s) and quotes the raw cell values.
    #[error("row {row}: {message}")]
    RowValidation { row: usize, message: String },

    // ===== Generic =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

/// Result alias for the import pipeline.
pub type ImportResult<T> = Result<T, ImportError>;
