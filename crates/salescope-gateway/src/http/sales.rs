//! Dataset inspection — GET /api/sales, GET /api/analysis.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::app::AppState;

/// GET /api/sales — every stored sale, in insertion order.
pub async fn list_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let sales = state.store.snapshot().map_err(internal)?;
    Ok(Json(json!(sales)))
}

/// GET /api/analysis — dataset-wide aggregates.
pub async fn analysis_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let summary = state.store.summary().map_err(internal)?;
    Ok(Json(json!(summary)))
}

fn internal<E: std::fmt::Display>(e: E) -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"error": e.to_string()})),
    )
}
