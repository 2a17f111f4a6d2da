//! Error types for tradedocs-core

use thiserror::Error;

use crate::document::DocumentType;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in tradedocs-core
#[derive(Debug, Error)]
pub enum Error {
    /// Sheet name already exists in the workbook
    #[error("Sheet name already exists: {0}")]
    DuplicateSheetName(String),

    /// Row has more cells than the table has columns
    #[error("Row has {width} cells but sheet '{sheet}' has {columns} columns")]
    RowTooWide {
        sheet: String,
        width: usize,
        columns: usize,
    },

    /// Unknown document type identifier
    #[error("Unknown document type: {0}")]
    UnknownDocumentType(String),

    /// Record appended to the accumulator of another document type
    #[error("Cannot append a {actual} record to the {expected} list")]
    DocumentTypeMismatch {
        expected: DocumentType,
        actual: DocumentType,
    },

    /// Reference schema file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Reference schema file is not valid JSON for the schema shape
    #[error("Invalid reference schema: {0}")]
    Schema(#[from] serde_json::Error),
}
