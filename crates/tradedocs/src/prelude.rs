//! Prelude module - common imports for tradedocs users
//!
//! ```rust
//! use tradedocs::prelude::*;
//! ```

pub use crate::{
    // Cell and table types
    CellValue,
    // Documents
    DocumentRecord,
    DocumentType,
    // Error types
    ExportError,
    ExportedFile,
    FieldValue,
    FormValues,
    LoadError,
    // Reference data
    ReferenceLists,
    ReferenceSchema,
    // Session
    Session,
    SessionError,
    Table,
    Workbook,
    // I/O types
    WorkbookReader,
    WorkbookSource,
};
