//! Schedule lifecycle + countdown — POST /stop, GET /api/time_remaining.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};
use tracing::info;

use crate::app::AppState;

/// GET /api/time_remaining — seconds until the next firing.
///
/// Polled by the display surface; never triggers work itself.
pub async fn time_remaining_handler(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({ "time_remaining": state.countdown.seconds_remaining() }))
}

/// POST /stop — cancel the trigger, reset countdown state, clear the
/// stored dataset.
pub async fn stop_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    state.scheduler.cancel_all();
    state.store.clear().map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": e.to_string()})),
        )
    })?;
    info!("schedule stopped and dataset cleared");
    Ok(Json(json!({"status": "stopped"})))
}
