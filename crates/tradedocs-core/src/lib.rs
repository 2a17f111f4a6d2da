//! # tradedocs-core
//!
//! Core data structures for the tradedocs document tool.
//!
//! This crate provides the pieces that do not touch the file system or the UI:
//! - [`CellValue`], [`Table`] and [`Workbook`] - the column-table view of a spreadsheet
//! - [`ReferenceSchema`] - which sheets and columns hold the reference data
//! - [`extract`] - derives [`ReferenceLists`] (senders, receivers, delivery terms)
//! - [`DocumentType`] and [`build`] - turn submitted form values into a [`DocumentRecord`]
//! - [`Accumulator`] - the ordered, append-only list of records per document type
//!
//! ## Example
//!
//! ```rust
//! use tradedocs_core::{build, extract_default, DocumentType, FormValues, Table, Workbook};
//!
//! let mut sender = Table::new("Sender", ["Company name", "Company address"]);
//! sender.push_row(vec!["Acme".into(), "123 Rd".into()]).unwrap();
//!
//! let mut workbook = Workbook::new();
//! workbook.add_table(sender).unwrap();
//!
//! let refs = extract_default(&workbook);
//! assert_eq!(refs.senders, vec!["Acme".to_string()]);
//!
//! let form: FormValues = [("sender", "Acme")].into_iter().collect();
//! let record = build(DocumentType::Cmr, &form, &refs);
//! assert_eq!(record.text("Sender address"), Some("123 Rd"));
//! ```

pub mod accumulator;
pub mod builder;
pub mod cell;
pub mod document;
pub mod error;
pub mod record;
pub mod reference;
pub mod schema;
pub mod table;
pub mod workbook;

pub use accumulator::{Accumulator, Accumulators};
pub use builder::{build, FormValues};
pub use cell::CellValue;
pub use document::{DocumentType, FieldKind, FieldSpec, OptionList};
pub use error::{Error, Result};
pub use record::{DocumentRecord, FieldValue};
pub use reference::{extract, extract_default, ExtractionWarning, Lookup, ReferenceLists};
pub use schema::{Attribute, AttributeColumn, LookupSheet, ReferenceSchema};
pub use table::Table;
pub use workbook::Workbook;
