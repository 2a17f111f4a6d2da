//! Request handlers

use std::collections::HashMap;
use std::path::{Path as FsPath, PathBuf};

use axum::extract::{Form, Multipart, Path, Query, State};
use axum::http::header;
use axum::response::{Html, IntoResponse, Redirect, Response};
use serde::Deserialize;
use tradedocs::{discover, DocumentType, FormValues, SessionError, WorkbookSource};

use crate::error::AppError;
use crate::page::{self, PageView};
use crate::state::{AppState, Notice, UiState};

#[derive(Debug, Default, Deserialize)]
pub struct IndexQuery {
    /// Sheet to preview
    pub sheet: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SelectForm {
    /// File name inside the data directory
    pub file: String,
}

/// `GET /`
pub async fn index(State(state): State<AppState>, Query(query): Query<IndexQuery>) -> Html<String> {
    let files = local_files(state.data_dir());

    let mut ui = state.lock();
    let notice = ui.notice.take();
    Html(page::render(&PageView {
        files: &files,
        session: &ui.session,
        notice: notice.as_ref(),
        preview_sheet: query.sheet.as_deref(),
        preview_rows: state.preview_rows(),
    }))
}

/// `POST /source/select`
pub async fn select_source(
    State(state): State<AppState>,
    Form(form): Form<SelectForm>,
) -> Redirect {
    // Only names listed in the data directory are accepted.
    let path = local_path(state.data_dir(), &form.file);

    let mut ui = state.lock();
    match path {
        Some(path) => open_source(&mut ui, WorkbookSource::path(path)),
        None => {
            tracing::warn!(file = %form.file, "Selected file is not in the data directory");
            ui.notice = Some(Notice::Error(format!("File not found: {}", form.file)));
        }
    }
    Redirect::to("/")
}

/// `POST /source/upload`
pub async fn upload_source(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Redirect, AppError> {
    let mut upload = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }
        let name = field.file_name().unwrap_or_default().to_string();
        let data = field.bytes().await?;
        // Browsers send an empty part when no file was chosen.
        if !name.is_empty() && !data.is_empty() {
            upload = Some((name, data));
        }
    }

    let mut ui = state.lock();
    match upload {
        Some((name, data)) => {
            tracing::debug!(file = %name, bytes = data.len(), "Received upload");
            open_source(&mut ui, WorkbookSource::bytes(name, data.to_vec()));
        }
        None => ui.notice = Some(Notice::Error("No file was uploaded".to_string())),
    }
    Ok(Redirect::to("/"))
}

/// `POST /documents/{kind}`
pub async fn submit_document(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Form(fields): Form<HashMap<String, String>>,
) -> Result<Redirect, AppError> {
    let document_type = parse_kind(&kind)?;
    let form: FormValues = fields.into_iter().collect();

    let mut ui = state.lock();
    let notice = match ui.session.submit(document_type, &form) {
        Ok(_) => {
            let count = ui.session.records(document_type).len();
            tracing::info!(document = %document_type, count, "Record added");
            Notice::Success(format!("{document_type} record added ({count} total)"))
        }
        Err(SessionError::NoWorkbook) => Notice::Error(SessionError::NoWorkbook.to_string()),
        Err(e) => return Err(e.into()),
    };
    ui.notice = Some(notice);

    Ok(Redirect::to(&format!("/#{}", document_type.slug())))
}

/// `GET /documents/{kind}/export`
pub async fn export_document(
    State(state): State<AppState>,
    Path(kind): Path<String>,
) -> Result<Response, AppError> {
    let document_type = parse_kind(&kind)?;
    let file = state.lock().session.export(document_type)?;

    tracing::info!(document = %document_type, bytes = file.bytes.len(), "Exported");
    Ok((
        [
            (header::CONTENT_TYPE, file.content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file.file_name),
            ),
        ],
        file.bytes,
    )
        .into_response())
}

/// `GET /health`
pub async fn health() -> &'static str {
    "ok"
}

fn parse_kind(kind: &str) -> Result<DocumentType, AppError> {
    kind.parse()
        .map_err(|_| AppError::UnknownDocument(kind.to_string()))
}

/// Open `source` and leave a notice describing the outcome
fn open_source(ui: &mut UiState, source: WorkbookSource) {
    let name = source.name();
    let notice = match ui.session.open(source) {
        Ok(refs) => Notice::Success(format!(
            "Loaded {name}: {} senders, {} receivers, {} delivery terms",
            refs.senders.len(),
            refs.receivers.len(),
            refs.incoterms.len()
        )),
        Err(e) => {
            Notice::Error(format!("Failed to open {name}: {e}"))
        }
    };
    ui.notice = Some(notice);
}

fn local_files(dir: &FsPath) -> Vec<String> {
    match discover(dir) {
        Ok(paths) => paths.iter().filter_map(|p| file_name(p)).collect(),
        Err(e) => {
            tracing::warn!("Cannot list {}: {e}", dir.display());
            Vec::new()
        }
    }
}

fn local_path(dir: &FsPath, name: &str) -> Option<PathBuf> {
    discover(dir)
        .ok()?
        .into_iter()
        .find(|p| file_name(p).as_deref() == Some(name))
}

fn file_name(path: &FsPath) -> Option<String> {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
}
