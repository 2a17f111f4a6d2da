//! # tradedocs-xlsx
//!
//! Spreadsheet I/O for tradedocs.
//!
//! - [`WorkbookReader`] loads `.xlsx`, `.xlsm` and `.xlsb` files (via calamine)
//!   into the column-table [`Workbook`](tradedocs_core::Workbook) model
//! - [`WorkbookCache`] keeps loaded workbooks for one session
//! - [`export`] writes accumulated records to a single-sheet `.xlsx` (via rust_xlsxwriter)
//! - [`discover`] lists spreadsheet files in a directory

mod cache;
mod error;
mod reader;
mod source;
mod writer;

pub use cache::WorkbookCache;
pub use error::{ExportError, ExportResult, LoadError, LoadResult};
pub use reader::WorkbookReader;
pub use source::{discover, Engine, WorkbookSource, SPREADSHEET_EXTENSIONS};
pub use writer::{export, export_columns, write_tables, XLSX_CONTENT_TYPE};
