//! HTTP handlers for the recipe service.

pub mod health;
pub mod metrics;
pub mod recipes;

use crate::models::ErrorResponse;
use axum::{http::StatusCode, response::IntoResponse, Json};

pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: "Not found".to_string(),
        }),
    )
}
