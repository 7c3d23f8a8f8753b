use crate::startup::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;

/// Liveness probe. Stays green without a Gemini key so the misconfiguration
/// is visible in the body rather than as a restart loop.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "recipe-service",
        "version": env!("CARGO_PKG_VERSION"),
        "gemini_configured": state.is_configured()
    }))
}
