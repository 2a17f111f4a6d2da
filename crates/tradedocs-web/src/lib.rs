//! # tradedocs-web
//!
//! A single-page form application over a [`tradedocs::Session`]: pick or
//! upload the reference workbook, fill in CMR, specification and invoice
//! forms, and download each accumulated list as `.xlsx`.
//!
//! ## Routes
//!
//! | Method | Path                        | Purpose                          |
//! |--------|-----------------------------|----------------------------------|
//! | GET    | `/`                         | The page (`?sheet=` previews)    |
//! | POST   | `/source/select`            | Open a file from the data dir    |
//! | POST   | `/source/upload`            | Open an uploaded file            |
//! | POST   | `/documents/{kind}`         | Add one record                   |
//! | GET    | `/documents/{kind}/export`  | Download the list                |
//! | GET    | `/health`                   | Liveness                         |

pub mod error;
pub mod handlers;
pub mod options;
pub mod page;
pub mod state;

pub use error::{AppError, ServeError};
pub use options::ServeOptions;
pub use state::{AppState, Notice};

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

/// Routes over `state`, without middleware
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .route("/source/select", post(handlers::select_source))
        .route("/source/upload", post(handlers::upload_source))
        .route("/documents/{kind}", post(handlers::submit_document))
        .route("/documents/{kind}/export", get(handlers::export_document))
        .with_state(state)
}

/// The full application for `options`
pub fn app(options: &ServeOptions) -> Router {
    let state = AppState::new(
        options.schema.clone(),
        options.data_dir.clone(),
        options.preview_rows,
    );
    router(state)
        .layer(DefaultBodyLimit::max(options.body_limit))
        .layer(TraceLayer::new_for_http())
}

/// Serve until Ctrl+C
pub async fn serve(options: ServeOptions) -> Result<(), ServeError> {
    let addr = options.addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        "Serving on http://{addr} (data directory: {})",
        options.data_dir.display()
    );

    axum::serve(listener, app(&options))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl+C: {e}");
        std::future::pending::<()>().await;
    }
}
