//! HTTP error mapping

use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tradedocs::SessionError;

/// Errors returned by handlers
#[derive(Debug, Error)]
pub enum AppError {
    /// Unknown document kind in the URL
    #[error("Unknown document type: {0}")]
    UnknownDocument(String),

    /// Malformed upload
    #[error("Upload failed: {0}")]
    Multipart(#[from] MultipartError),

    /// Export or other session failure
    #[error(transparent)]
    Session(#[from] SessionError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::UnknownDocument(_) => StatusCode::NOT_FOUND,
            AppError::Multipart(_) => StatusCode::BAD_REQUEST,
            AppError::Session(SessionError::NoWorkbook) => StatusCode::CONFLICT,
            AppError::Session(SessionError::Load(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Session(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!("{self}");
        }
        (status, self.to_string()).into_response()
    }
}

/// Errors starting or running the server
#[derive(Debug, Error)]
pub enum ServeError {
    #[error("Invalid listen address: {0}")]
    Addr(#[from] std::net::AddrParseError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
