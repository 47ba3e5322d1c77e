//! Read endpoints over the published batch snapshot.

use axum::extract::State;
use axum::Json;
use serde_json::Value;

use super::AppState;
use crate::error::AppError;

/// Ticker to validated transaction list from the latest batch run.
pub async fn get_trades(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let snapshot = state.snapshots.load();
    let body = serde_json::to_value(&snapshot.valid_by_ticker)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    Ok(Json(body))
}

/// Full matched results, including realized totals per ticker.
pub async fn get_valid_trades(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let snapshot = state.snapshots.load();
    let body = serde_json::to_value(&snapshot.matched)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    Ok(Json(body))
}
