//! One interactive session: the active workbook, its reference lists and the
//! records accumulated so far
//!
//! Sessions share nothing. Each owns its workbook cache and accumulators and
//! everything is dropped with the session.

use std::sync::Arc;

use thiserror::Error;
use tradedocs_core::{
    build, extract, Accumulators, DocumentRecord, DocumentType, FormValues, ReferenceLists,
    ReferenceSchema, Workbook,
};
use tradedocs_xlsx::{
    export, ExportError, LoadError, WorkbookCache, WorkbookSource, XLSX_CONTENT_TYPE,
};

/// Result type for session operations
pub type SessionResult<T> = std::result::Result<T, SessionError>;

/// Errors surfaced to the user of a session
#[derive(Debug, Error)]
pub enum SessionError {
    /// No workbook has been opened successfully
    #[error("No workbook loaded; select or upload a spreadsheet first")]
    NoWorkbook,

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Core(#[from] tradedocs_core::Error),
}

/// An exported document list ready for download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    pub file_name: &'static str,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

#[derive(Debug)]
struct ActiveWorkbook {
    name: String,
    workbook: Arc<Workbook>,
    references: ReferenceLists,
}

/// Session state
#[derive(Debug)]
pub struct Session {
    schema: ReferenceSchema,
    cache: WorkbookCache,
    active: Option<ActiveWorkbook>,
    accumulators: Accumulators,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(ReferenceSchema::default())
    }
}

impl Session {
    /// Create an empty session using `schema` for reference extraction
    pub fn new(schema: ReferenceSchema) -> Self {
        Self {
            schema,
            cache: WorkbookCache::new(),
            active: None,
            accumulators: Accumulators::new(),
        }
    }

    pub fn schema(&self) -> &ReferenceSchema {
        &self.schema
    }

    /// Make `source` the active workbook.
    ///
    /// On failure the session has no active workbook until a valid source is
    /// opened; accumulated records are kept.
    pub fn open(&mut self, source: WorkbookSource) -> SessionResult<&ReferenceLists> {
        let name = source.name();
        let workbook = match self.cache.get_or_load(&source) {
            Ok(workbook) => workbook,
            Err(e) => {
                tracing::warn!("Failed to open '{name}': {e}");
                self.active = None;
                return Err(e.into());
            }
        };

        let references = extract(&workbook, &self.schema);
        tracing::info!(
            "Opened '{}': {} senders, {} receivers, {} delivery terms",
            name,
            references.senders.len(),
            references.receivers.len(),
            references.incoterms.len()
        );

        let active = self.active.insert(ActiveWorkbook {
            name,
            workbook,
            references,
        });
        Ok(&active.references)
    }

    /// Check if a workbook is active
    pub fn has_workbook(&self) -> bool {
        self.active.is_some()
    }

    /// Name of the active source
    pub fn source_name(&self) -> Option<&str> {
        self.active.as_ref().map(|a| a.name.as_str())
    }

    /// The active workbook
    pub fn workbook(&self) -> Option<&Workbook> {
        self.active.as_ref().map(|a| a.workbook.as_ref())
    }

    /// Reference lists of the active workbook
    pub fn references(&self) -> Option<&ReferenceLists> {
        self.active.as_ref().map(|a| &a.references)
    }

    /// Build a record from submitted form values and append it
    pub fn submit(
        &mut self,
        document_type: DocumentType,
        form: &FormValues,
    ) -> SessionResult<DocumentRecord> {
        let active = self.active.as_ref().ok_or(SessionError::NoWorkbook)?;
        let record = build(document_type, form, &active.references);
        self.accumulators.append(record.clone())?;

        tracing::debug!(
            "{} {} records",
            self.accumulators.get(document_type).len(),
            document_type
        );
        Ok(record)
    }

    /// Records of a document type in submission order
    pub fn records(&self, document_type: DocumentType) -> &[DocumentRecord] {
        self.accumulators.get(document_type).all()
    }

    pub fn accumulators(&self) -> &Accumulators {
        &self.accumulators
    }

    /// Number of workbooks loaded in this session
    pub fn cached_workbooks(&self) -> usize {
        self.cache.len()
    }

    /// Export the records of a document type
    pub fn export(&self, document_type: DocumentType) -> SessionResult<ExportedFile> {
        let bytes = export(document_type.sheet_name(), self.records(document_type))?;
        Ok(ExportedFile {
            file_name: document_type.file_name(),
            content_type: XLSX_CONTENT_TYPE,
            bytes,
        })
    }
}
