//! # tradedocs
//!
//! Build CMR waybill, specification and invoice tables from the reference
//! data in a spreadsheet workbook, and export them back to `.xlsx`.
//!
//! ## Features
//!
//! - Load `.xlsx`, `.xlsm` and `.xlsb` workbooks from disk or from uploaded bytes
//! - Extract senders, receivers/carriers and delivery terms with their addresses
//! - Assemble one record per submitted form from a declarative field table
//! - Accumulate records per document type and export each list as a workbook
//!
//! ## Example
//!
//! ```rust,no_run
//! use tradedocs::prelude::*;
//!
//! let mut session = Session::new(ReferenceSchema::default());
//! session.open(WorkbookSource::path("reference.xlsx")).unwrap();
//!
//! let form: FormValues = [("sender", "Acme"), ("receiver", "Beta")].into_iter().collect();
//! session.submit(DocumentType::Cmr, &form).unwrap();
//!
//! let file = session.export(DocumentType::Cmr).unwrap();
//! std::fs::write(file.file_name, &file.bytes).unwrap();
//! ```

pub mod prelude;
pub mod session;

pub use session::{ExportedFile, Session, SessionError, SessionResult};

// Re-export core types
pub use tradedocs_core::{
    build, extract, extract_default, Accumulator, Accumulators, Attribute, AttributeColumn,
    CellValue, DocumentRecord, DocumentType, Error, ExtractionWarning, FieldKind, FieldSpec,
    FieldValue, FormValues, Lookup, LookupSheet, OptionList, ReferenceLists, ReferenceSchema,
    Result, Table, Workbook,
};

// Re-export I/O types
pub use tradedocs_xlsx::{
    discover, export, export_columns, write_tables, Engine, ExportError, ExportResult, LoadError,
    LoadResult, WorkbookCache, WorkbookReader, WorkbookSource, SPREADSHEET_EXTENSIONS,
    XLSX_CONTENT_TYPE,
};
