//! Session-scoped workbook cache
//!
//! A workbook is parsed once per source identity. A different file, a file
//! that changed on disk or a different upload is a new identity and gets its
//! own entry. Each session owns its cache; nothing is shared between sessions.
//!
//! The cache holds at most [`DEFAULT_CAPACITY`] workbooks unless built with
//! [`WorkbookCache::with_capacity`]; the oldest entry is evicted first.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::SystemTime;

use ahash::AHashMap;
use tradedocs_core::Workbook;

use crate::error::{LoadError, LoadResult};
use crate::reader::WorkbookReader;
use crate::source::WorkbookSource;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum SourceKey {
    Path {
        path: PathBuf,
        len: u64,
        modified: Option<SystemTime>,
    },
    Upload {
        name: String,
        len: usize,
        digest: u64,
    },
}

/// Workbooks kept per cache when no capacity is given
pub const DEFAULT_CAPACITY: usize = 4;

/// Loaded workbooks keyed by source identity
#[derive(Debug)]
pub struct WorkbookCache {
    entries: AHashMap<SourceKey, Arc<Workbook>>,
    order: VecDeque<SourceKey>,
    capacity: usize,
    hasher: ahash::RandomState,
}

impl Default for WorkbookCache {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl WorkbookCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// A cache keeping at most `capacity` workbooks (at least one)
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: AHashMap::new(),
            order: VecDeque::new(),
            capacity: capacity.max(1),
            hasher: ahash::RandomState::new(),
        }
    }

    /// Return the cached workbook for `source`, loading it on first use
    pub fn get_or_load(&mut self, source: &WorkbookSource) -> LoadResult<Arc<Workbook>> {
        let key = self.key(source)?;

        if let Some(workbook) = self.entries.get(&key) {
            tracing::debug!("Workbook cache hit for '{}'", source.name());
            return Ok(Arc::clone(workbook));
        }

        let workbook = Arc::new(WorkbookReader::load(source)?);
        while self.entries.len() >= self.capacity {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            self.entries.remove(&oldest);
            tracing::debug!("Evicted a cached workbook ({} kept)", self.entries.len());
        }
        self.order.push_back(key.clone());
        self.entries.insert(key, Arc::clone(&workbook));
        Ok(workbook)
    }

    /// Number of cached workbooks
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Most workbooks kept at once
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop every cached workbook
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    fn key(&self, source: &WorkbookSource) -> LoadResult<SourceKey> {
        match source {
            WorkbookSource::Path(path) => {
                let metadata = std::fs::metadata(path).map_err(|e| match e.kind() {
                    std::io::ErrorKind::NotFound => LoadError::NotFound(path.clone()),
                    _ => LoadError::Io(e),
                })?;
                Ok(SourceKey::Path {
                    path: std::fs::canonicalize(path)?,
                    len: metadata.len(),
                    modified: metadata.modified().ok(),
                })
            }
            WorkbookSource::Bytes { name, data } => Ok(SourceKey::Upload {
                name: name.clone(),
                len: data.len(),
                digest: self.hasher.hash_one(&data[..]),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::write_tables;
    use tradedocs_core::Table;

    fn workbook_bytes(sheet: &str) -> Vec<u8> {
        let mut t = Table::new(sheet, ["Name"]);
        t.push_row(vec!["Acme".into()]).unwrap();
        write_tables(&[t]).unwrap()
    }

    #[test]
    fn test_same_upload_hits_cache() {
        let mut cache = WorkbookCache::new();
        let source = WorkbookSource::bytes("refs.xlsx", workbook_bytes("Sender"));

        let a = cache.get_or_load(&source).unwrap();
        let b = cache.get_or_load(&source.clone()).unwrap();

        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_new_source_gets_new_entry() {
        let mut cache = WorkbookCache::new();
        let a = cache
            .get_or_load(&WorkbookSource::bytes("refs.xlsx", workbook_bytes("Sender")))
            .unwrap();
        let b = cache
            .get_or_load(&WorkbookSource::bytes("refs.xlsx", workbook_bytes("Receiver")))
            .unwrap();

        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(b.sheet_names(), vec!["Receiver"]);
        assert_eq!(cache.len(), 2);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_oldest_entry_is_evicted() {
        let mut cache = WorkbookCache::with_capacity(2);
        let first = WorkbookSource::bytes("a.xlsx", workbook_bytes("Sender"));
        let a = cache.get_or_load(&first).unwrap();
        cache
            .get_or_load(&WorkbookSource::bytes("b.xlsx", workbook_bytes("Receiver")))
            .unwrap();
        cache
            .get_or_load(&WorkbookSource::bytes("c.xlsx", workbook_bytes("Extra data")))
            .unwrap();
        assert_eq!(cache.len(), 2);

        // "a.xlsx" was evicted, so it is parsed again.
        let again = cache.get_or_load(&first).unwrap();
        assert!(!Arc::ptr_eq(&a, &again));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_capacity_is_at_least_one() {
        let mut cache = WorkbookCache::with_capacity(0);
        assert_eq!(cache.capacity(), 1);

        cache
            .get_or_load(&WorkbookSource::bytes("a.xlsx", workbook_bytes("Sender")))
            .unwrap();
        cache
            .get_or_load(&WorkbookSource::bytes("b.xlsx", workbook_bytes("Receiver")))
            .unwrap();
        assert_eq!(cache.len(), 1);
        assert_eq!(WorkbookCache::new().capacity(), DEFAULT_CAPACITY);
    }

    #[test]
    fn test_path_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("refs.xlsx");
        std::fs::write(&path, workbook_bytes("Sender")).unwrap();

        let mut cache = WorkbookCache::new();
        let a = cache.get_or_load(&WorkbookSource::path(&path)).unwrap();
        let b = cache.get_or_load(&WorkbookSource::path(&path)).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_missing_path_is_not_cached() {
        let mut cache = WorkbookCache::new();
        let err = cache
            .get_or_load(&WorkbookSource::path("/no/such/refs.xlsx"))
            .unwrap_err();
        assert!(matches!(err, LoadError::NotFound(_)));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_failed_parse_is_not_cached() {
        let mut cache = WorkbookCache::new();
        let source = WorkbookSource::bytes("refs.xlsx", b"garbage".to_vec());
        assert!(cache.get_or_load(&source).is_err());
        assert!(cache.is_empty());
    }
}
