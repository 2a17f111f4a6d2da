//! Document records - one submitted form row

use std::fmt;

use chrono::NaiveDate;

use crate::cell::CellValue;
use crate::document::DocumentType;

/// Value of one record column
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Date(NaiveDate),
}

impl FieldValue {
    /// Text as shown in tables
    pub fn to_text(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Date(d) => d.format("%Y-%m-%d").to_string(),
        }
    }

    /// Borrow the text, if this is a text value
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::Date(_) => None,
        }
    }

    /// The date, if this is a date value
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            FieldValue::Date(d) => Some(*d),
            FieldValue::Text(_) => None,
        }
    }

    /// Spreadsheet cell for this value; empty text becomes an empty cell
    pub fn to_cell(&self) -> CellValue {
        match self {
            FieldValue::Text(s) if s.is_empty() => CellValue::Empty,
            FieldValue::Text(s) => CellValue::string(s.as_str()),
            FieldValue::Date(d) => CellValue::date(*d),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(d: NaiveDate) -> Self {
        FieldValue::Date(d)
    }
}

/// One flat record of a document type
///
/// Columns keep the order they were added in. Records are not edited after
/// creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRecord {
    document_type: DocumentType,
    fields: Vec<(String, FieldValue)>,
}

impl DocumentRecord {
    /// Create a record from ordered column/value pairs
    pub fn new<I, K, V>(document_type: DocumentType, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<FieldValue>,
    {
        Self {
            document_type,
            fields: fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn document_type(&self) -> DocumentType {
        self.document_type
    }

    /// Column names in insertion order
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    /// Column/value pairs in insertion order
    pub fn fields(&self) -> &[(String, FieldValue)] {
        &self.fields
    }

    /// Get a value by column name
    pub fn get(&self, column: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(k, _)| k == column)
            .map(|(_, v)| v)
    }

    /// Get a text value by column name
    pub fn text(&self, column: &str) -> Option<&str> {
        self.get(column).and_then(FieldValue::as_text)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
