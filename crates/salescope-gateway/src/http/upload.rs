//! CSV upload + schedule installation — POST /upload.

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use tracing::{info, warn};

use salescope_core::Frequency;
use salescope_report::{ReportConfig, ReportJob};

use crate::app::AppState;

/// POST /upload — multipart form: `file` (CSV), `frequency`, `pdf_name`,
/// optional `pdf_save_path`.
///
/// Replaces the stored dataset and (re)installs the report trigger bound to
/// the submitted configuration. Responds with the nominal interval so the
/// timer page can start counting immediately.
pub async fn upload_handler(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let mut file: Option<Vec<u8>> = None;
    let mut frequency: Option<String> = None;
    let mut pdf_name: Option<String> = None;
    let mut pdf_save_path: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(bad_request)? {
        let name = field.name().map(ToString::to_string);
        match name.as_deref() {
            Some("file") => file = Some(field.bytes().await.map_err(bad_request)?.to_vec()),
            Some("frequency") => frequency = Some(field.text().await.map_err(bad_request)?),
            Some("pdf_name") => pdf_name = Some(field.text().await.map_err(bad_request)?),
            Some("pdf_save_path") => {
                pdf_save_path = Some(field.text().await.map_err(bad_request)?)
            }
            _ => {}
        }
    }

    let file = file.ok_or_else(|| missing("file"))?;
    let frequency: Frequency = frequency
        .ok_or_else(|| missing("frequency"))?
        .parse()
        .map_err(bad_request)?;
    let pdf_name = pdf_name.ok_or_else(|| missing("pdf_name"))?;

    let sales = salescope_store::ingest::parse_sales(file.as_slice()).map_err(bad_request)?;
    let rows = state.store.replace_all(&sales).map_err(internal)?;
    info!(rows, "dataset replaced from upload");

    let output_dir = pdf_save_path
        .filter(|p| !p.is_empty())
        .or_else(|| state.config.report.output_dir.clone())
        .map(PathBuf::from);
    let config = ReportConfig::new(&pdf_name, output_dir);
    let job = Arc::new(ReportJob::new(Arc::clone(&state.store), config));
    let nominal = state
        .scheduler
        .install(frequency, Arc::new(move || job.run()));

    Ok(Json(json!({
        "status": "scheduled",
        "rows": rows,
        "frequency": frequency,
        "next_run_in": nominal.num_seconds(),
    })))
}

fn bad_request<E: std::fmt::Display>(e: E) -> (StatusCode, Json<Value>) {
    warn!(error = %e, "upload rejected");
    (
        StatusCode::BAD_REQUEST,
        Json(json!({"error": e.to_string()})),
    )
}

fn missing(field: &str) -> (StatusCode, Json<Value>) {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({"error": format!("missing form field: {field}")})),
    )
}

fn internal<E: std::fmt::Display>(e: E) -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"error": e.to_string()})),
    )
}
