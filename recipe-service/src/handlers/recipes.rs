use crate::error::RecipeError;
use crate::services::{metrics, strip_code_fence, StructuredPrompt};
use crate::startup::AppState;
use axum::{
    body::{to_bytes, Bytes},
    extract::{Request, State},
    http::{header, Method},
    response::{IntoResponse, Response},
};
use serde::de::IgnoredAny;
use serde_json::Value;

pub const GENERATE_RECIPES_PATH: &str = "/api/generate-recipes";

/// Turn `{"ingredients": "..."}` into three recipes.
///
/// Routed for every method so the configuration check can run before the
/// method check.
#[tracing::instrument(skip_all, fields(method = %req.method()))]
pub async fn generate_recipes(
    State(state): State<AppState>,
    req: Request,
) -> Result<Response, RecipeError> {
    let result = handle(&state, req).await;

    match &result {
        Ok(_) => metrics::record_recipe_request("success"),
        Err(e) => {
            tracing::info!(outcome = e.outcome(), status = %e.status(), "Recipe request failed");
            metrics::record_recipe_request(e.outcome());
        }
    }

    result
}

async fn handle(state: &AppState, req: Request) -> Result<Response, RecipeError> {
    let provider = state
        .text_provider
        .as_ref()
        .ok_or(RecipeError::Configuration)?;

    if req.method() != Method::POST {
        return Err(RecipeError::MethodNotAllowed);
    }

    let body = read_body(req).await?;
    let ingredients = parse_ingredients(&body)?;

    let prompt = StructuredPrompt::for_ingredients(&ingredients);
    let generated = provider.generate(&prompt).await?;
    let recipes = sanitize_output(&generated)?;

    tracing::info!(response_len = recipes.len(), "Generated recipes");

    Ok(([(header::CONTENT_TYPE, "application/json")], recipes).into_response())
}

async fn read_body(req: Request) -> Result<Bytes, RecipeError> {
    to_bytes(req.into_body(), usize::MAX)
        .await
        .map_err(|e| RecipeError::InvalidJson(e.to_string()))
}

/// `ingredients` must be a JSON string; any string is accepted.
fn parse_ingredients(body: &[u8]) -> Result<String, RecipeError> {
    let payload: Value =
        serde_json::from_slice(body).map_err(|e| RecipeError::InvalidJson(e.to_string()))?;

    match payload.get("ingredients") {
        Some(Value::String(ingredients)) => Ok(ingredients.clone()),
        _ => Err(RecipeError::InvalidInput),
    }
}

/// Strip fences, then make sure what we relay under a JSON content type is JSON.
/// The text itself is passed through untouched.
fn sanitize_output(generated: &str) -> Result<String, RecipeError> {
    let cleaned = strip_code_fence(generated);

    if let Err(e) = serde_json::from_str::<IgnoredAny>(cleaned) {
        tracing::warn!(
            error = %e,
            response_len = cleaned.len(),
            "Gemini output is not valid JSON"
        );
        return Err(RecipeError::MalformedUpstreamResult);
    }

    Ok(cleaned.to_string())
}
