//! Session accumulators - append-only record lists per document type

use crate::document::DocumentType;
use crate::error::{Error, Result};
use crate::record::DocumentRecord;

/// Ordered records of a single document type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accumulator {
    document_type: DocumentType,
    records: Vec<DocumentRecord>,
}

impl Accumulator {
    pub fn new(document_type: DocumentType) -> Self {
        Self {
            document_type,
            records: Vec::new(),
        }
    }

    pub fn document_type(&self) -> DocumentType {
        self.document_type
    }

    /// Append a record at the end
    pub fn append(&mut self, record: DocumentRecord) -> Result<()> {
        if record.document_type() != self.document_type {
            return Err(Error::DocumentTypeMismatch {
                expected: self.document_type,
                actual: record.document_type(),
            });
        }
        self.records.push(record);
        Ok(())
    }

    /// All records in insertion order
    pub fn all(&self) -> &[DocumentRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// One accumulator per document type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accumulators {
    lists: [Accumulator; 3],
}

impl Default for Accumulators {
    fn default() -> Self {
        Self {
            lists: DocumentType::ALL.map(Accumulator::new),
        }
    }
}

impl Accumulators {
    pub fn new() -> Self {
        Self::default()
    }

    /// The accumulator of a document type
    pub fn get(&self, document_type: DocumentType) -> &Accumulator {
        &self.lists[Self::slot(document_type)]
    }

    /// Append a record to the accumulator of its own type
    pub fn append(&mut self, record: DocumentRecord) -> Result<()> {
        self.lists[Self::slot(record.document_type())].append(record)
    }

    /// Iterate over all accumulators
    pub fn iter(&self) -> impl Iterator<Item = &Accumulator> {
        self.lists.iter()
    }

    fn slot(document_type: DocumentType) -> usize {
        match document_type {
            DocumentType::Cmr => 0,
            DocumentType::Specification => 1,
            DocumentType::Invoice => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(dt: DocumentType, n: &str) -> DocumentRecord {
        DocumentRecord::new(dt, [("No.", n)])
    }

    #[test]
    fn test_append_preserves_order() {
        let mut acc = Accumulator::new(DocumentType::Cmr);
        assert!(acc.is_empty());

        acc.append(record(DocumentType::Cmr, "1")).unwrap();
        acc.append(record(DocumentType::Cmr, "2")).unwrap();

        let numbers: Vec<_> = acc.all().iter().map(|r| r.text("No.").unwrap()).collect();
        assert_eq!(numbers, vec!["1", "2"]);
    }

    #[test]
    fn test_append_rejects_other_type() {
        let mut acc = Accumulator::new(DocumentType::Invoice);
        let err = acc.append(record(DocumentType::Cmr, "1")).unwrap_err();
        assert!(matches!(
            err,
            Error::DocumentTypeMismatch {
                expected: DocumentType::Invoice,
                actual: DocumentType::Cmr
            }
        ));
        assert!(acc.is_empty());
    }

    #[test]
    fn test_accumulators_route_by_type() {
        let mut accs = Accumulators::new();
        accs.append(record(DocumentType::Invoice, "I-1")).unwrap();
        accs.append(record(DocumentType::Cmr, "C-1")).unwrap();
        accs.append(record(DocumentType::Invoice, "I-2")).unwrap();

        assert_eq!(accs.get(DocumentType::Cmr).len(), 1);
        assert_eq!(accs.get(DocumentType::Specification).len(), 0);
        assert_eq!(accs.get(DocumentType::Invoice).len(), 2);

        let kinds: Vec<_> = accs.iter().map(Accumulator::document_type).collect();
        assert_eq!(kinds, DocumentType::ALL.to_vec());
    }
}
