use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, ToolError>;

/// Error type covering the different failure cases that can occur when the
/// tool reads the pricing workbooks, builds the model, or emits its outputs.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Wrapper for IO failures such as reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when JSON parsing or serialization fails.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Errors bubbled up from the Excel writer implementation.
    #[error("Excel write error: {0}")]
    ExcelWrite(#[from] rust_xlsxwriter::XlsxError),

    /// Errors bubbled up while opening an Excel workbook.
    #[error("Excel read error: {0}")]
    ExcelRead(#[from] calamine::XlsxError),

    /// Raised when a workbook is present but one of its sheets cannot be parsed.
    #[error("failed to load sheet '{sheet}': {source}")]
    SheetLoad {
        sheet: String,
        #[source]
        source: calamine::XlsxError,
    },

    /// Raised when the requested sheet is not part of the workbook.
    #[error("missing sheet '{0}'")]
    MissingSheet(String),

    /// Raised when a price cell holds something that is not a usable amount.
    #[error("invalid value '{value}' at row {row}, column {column}")]
    InvalidCell {
        row: usize,
        column: usize,
        value: String,
    },

    /// Raised when an input file does not exist.
    #[error("input file not found: {0}")]
    MissingInput(PathBuf),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}
