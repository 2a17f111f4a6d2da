//! Shared application state

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tradedocs::{ReferenceSchema, Session};

/// One-shot message shown on the next page render
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

/// The single session plus its pending notice
#[derive(Debug)]
pub struct UiState {
    pub session: Session,
    pub notice: Option<Notice>,
}

/// State shared between handlers
///
/// Requests lock the session for their whole (short, synchronous) run, so
/// submissions are applied one at a time.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<Mutex<UiState>>,
    data_dir: Arc<PathBuf>,
    preview_rows: usize,
}

impl AppState {
    pub fn new(schema: ReferenceSchema, data_dir: impl Into<PathBuf>, preview_rows: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(UiState {
                session: Session::new(schema),
                notice: None,
            })),
            data_dir: Arc::new(data_dir.into()),
            preview_rows,
        }
    }

    /// Lock the session state
    pub fn lock(&self) -> MutexGuard<'_, UiState> {
        // A handler panic leaves the state consistent: every mutation is a
        // single push or assignment.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn preview_rows(&self) -> usize {
        self.preview_rows
    }
}
