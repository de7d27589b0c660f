use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// Health check del servicio
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": state.config.app_name,
        "version": state.config.app_version,
    }))
}
