//! Load and export error types

use std::path::PathBuf;

use thiserror::Error;

/// Result type for loading workbooks
pub type LoadResult<T> = std::result::Result<T, LoadError>;

/// Result type for exporting records
pub type ExportResult<T> = std::result::Result<T, ExportError>;

/// Errors that can occur while opening a workbook
#[derive(Debug, Error)]
pub enum LoadError {
    /// The path source does not exist
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The data is not a readable spreadsheet
    #[error("Cannot read spreadsheet '{name}': {message}")]
    Parse { name: String, message: String },

    /// Core error
    #[error("Core error: {0}")]
    Core(#[from] tradedocs_core::Error),
}

/// Errors that can occur while exporting records
#[derive(Debug, Error)]
pub enum ExportError {
    /// More columns than a sheet can hold
    #[error("Too many columns: {0}")]
    TooManyColumns(usize),

    /// More rows than a sheet can hold
    #[error("Too many rows: {0}")]
    TooManyRows(usize),

    /// Writer error (invalid sheet name, date out of range, ...)
    #[error("XLSX error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}
