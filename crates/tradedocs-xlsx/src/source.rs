//! Workbook sources and spreadsheet discovery

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::LoadResult;

/// File extensions offered as workbook sources
pub const SPREADSHEET_EXTENSIONS: [&str; 3] = ["xlsx", "xlsm", "xlsb"];

/// Where a workbook comes from
#[derive(Clone, PartialEq, Eq)]
pub enum WorkbookSource {
    /// A file on disk
    Path(PathBuf),
    /// Uploaded bytes; `name` only selects the parser
    Bytes { name: String, data: Arc<[u8]> },
}

impl WorkbookSource {
    pub fn path<P: Into<PathBuf>>(path: P) -> Self {
        WorkbookSource::Path(path.into())
    }

    pub fn bytes(name: impl Into<String>, data: impl Into<Arc<[u8]>>) -> Self {
        WorkbookSource::Bytes {
            name: name.into(),
            data: data.into(),
        }
    }

    /// File name used for display and for choosing the parser
    pub fn name(&self) -> String {
        match self {
            WorkbookSource::Path(path) => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
            WorkbookSource::Bytes { name, .. } => name.clone(),
        }
    }

    /// Parser engine for this source
    pub fn engine(&self) -> Engine {
        Engine::from_name(&self.name())
    }
}

impl fmt::Debug for WorkbookSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkbookSource::Path(path) => f.debug_tuple("Path").field(path).finish(),
            WorkbookSource::Bytes { name, data } => f
                .debug_struct("Bytes")
                .field("name", name)
                .field("len", &data.len())
                .finish(),
        }
    }
}

/// Spreadsheet parser selected by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Engine {
    /// Office Open XML (`.xlsx`, `.xlsm` and anything unrecognised)
    Xlsx,
    /// Binary workbook (`.xlsb`)
    Xlsb,
}

impl Engine {
    /// Pick the engine for a file name
    pub fn from_name(name: &str) -> Self {
        if name.to_lowercase().ends_with(".xlsb") {
            Engine::Xlsb
        } else {
            Engine::Xlsx
        }
    }
}

/// List the spreadsheet files directly inside `dir`, sorted by name
pub fn discover<P: AsRef<Path>>(dir: P) -> LoadResult<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in std::fs::read_dir(dir.as_ref())? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let is_spreadsheet = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .is_some_and(|e| SPREADSHEET_EXTENSIONS.contains(&e.as_str()));

        if is_spreadsheet {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_engine_from_name() {
        assert_eq!(Engine::from_name("refs.xlsx"), Engine::Xlsx);
        assert_eq!(Engine::from_name("refs.XLSM"), Engine::Xlsx);
        assert_eq!(Engine::from_name("refs.XLSB"), Engine::Xlsb);
        assert_eq!(Engine::from_name("noext"), Engine::Xlsx);
    }

    #[test]
    fn test_source_name() {
        assert_eq!(WorkbookSource::path("/data/refs.xlsb").name(), "refs.xlsb");
        assert_eq!(WorkbookSource::path("/data/refs.xlsb").engine(), Engine::Xlsb);
        assert_eq!(WorkbookSource::bytes("up.xlsx", vec![1u8, 2]).name(), "up.xlsx");
    }

    #[test]
    fn test_discover_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.xlsx", "a.XLSB", "c.xlsm", "notes.txt", "d.xls", "e.csv"] {
            std::fs::write(dir.path().join(name), b"").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested.xlsx")).unwrap();

        let names: Vec<_> = discover(dir.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(names, vec!["a.XLSB", "b.xlsx", "c.xlsm"]);
    }

    #[test]
    fn test_discover_missing_dir() {
        assert!(discover("/definitely/not/here").is_err());
    }
}
