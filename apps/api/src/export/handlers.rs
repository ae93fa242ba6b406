use axum::{extract::State, response::Html, Json};
use serde::Serialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::export::html::{render_fragment, render_print_html};
use crate::export::paginate::{build_print_document, PrintDocument};
use crate::export::{write_print_file, ExportError};
use crate::resume::projection::project;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportReceipt {
    pub file_name: String,
    pub path: String,
    pub page_count: usize,
}

/// GET /api/v1/export/html
pub async fn handle_export_html(State(state): State<AppState>) -> Html<String> {
    let current = state.session.current().await;
    Html(render_fragment(&project(&current)))
}

/// GET /api/v1/export/print
pub async fn handle_print_layout(
    State(state): State<AppState>,
) -> Result<Json<PrintDocument>, AppError> {
    let current = state.session.current().await;
    let page_config = state.page_config.clone();
    let document = tokio::task::spawn_blocking(move || build_print_document(&current, &page_config))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("print layout task failed: {e}")))?;
    Ok(Json(document))
}

/// POST /api/v1/export/print
///
/// Lays out the current state and writes the print HTML into the export directory.
/// Failures surface as a retryable export error; the résumé state is never touched.
pub async fn handle_write_print(
    State(state): State<AppState>,
) -> Result<Json<ExportReceipt>, AppError> {
    let current = state.session.current().await;
    let page_config = state.page_config.clone();
    let export_dir = state.config.export_dir.clone();

    let result = tokio::task::spawn_blocking(move || -> Result<ExportReceipt, ExportError> {
        let document = build_print_document(&current, &page_config);
        let html = render_print_html(&document, &page_config);
        let path = write_print_file(&export_dir, &document.html_file_name(), &html)?;
        Ok(ExportReceipt {
            file_name: document.file_name,
            path: path.display().to_string(),
            page_count: document.pages.len(),
        })
    })
    .await
    .map_err(|e| ExportError::Task(e.to_string()))
    .and_then(|r| r);

    match result {
        Ok(receipt) => {
            info!(
                "Wrote print document {} ({} pages)",
                receipt.path, receipt.page_count
            );
            Ok(Json(receipt))
        }
        Err(e) => {
            warn!("Print export failed: {e}");
            Err(AppError::Export(e))
        }
    }
}
