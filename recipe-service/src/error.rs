use crate::models::ErrorResponse;
use crate::services::ProviderError;
use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

/// Every way a recipe request can fail.
///
/// The `Display` text of each variant is exactly what the caller sees in the
/// `error` field; diagnostic detail stays in the logs.
#[derive(Debug, Error)]
pub enum RecipeError {
    #[error("Server configuration error: GEMINI_API_KEY not set.")]
    Configuration,

    #[error("Method Not Allowed")]
    MethodNotAllowed,

    #[error("Invalid JSON body.")]
    InvalidJson(String),

    #[error("Missing or invalid 'ingredients' in request body.")]
    InvalidInput,

    /// Upstream status is mirrored to the caller, its body is not.
    #[error("Gemini API failed to generate content.")]
    Upstream(StatusCode),

    #[error("Gemini returned no structured content.")]
    EmptyUpstreamResult,

    #[error("Gemini returned malformed JSON.")]
    MalformedUpstreamResult,

    #[error("Internal server error during recipe generation.")]
    Internal(#[source] anyhow::Error),
}

impl RecipeError {
    pub fn status(&self) -> StatusCode {
        match self {
            RecipeError::Configuration => StatusCode::INTERNAL_SERVER_ERROR,
            RecipeError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            RecipeError::InvalidJson(_) | RecipeError::InvalidInput => StatusCode::BAD_REQUEST,
            RecipeError::Upstream(status) => *status,
            RecipeError::EmptyUpstreamResult
            | RecipeError::MalformedUpstreamResult
            | RecipeError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Metrics label for this failure.
    pub fn outcome(&self) -> &'static str {
        match self {
            RecipeError::Configuration => "configuration_error",
            RecipeError::MethodNotAllowed => "method_not_allowed",
            RecipeError::InvalidJson(_) => "invalid_json",
            RecipeError::InvalidInput => "invalid_input",
            RecipeError::Upstream(_) => "upstream_error",
            RecipeError::EmptyUpstreamResult => "empty_upstream_result",
            RecipeError::MalformedUpstreamResult => "malformed_upstream_result",
            RecipeError::Internal(_) => "internal_error",
        }
    }
}

impl From<ProviderError> for RecipeError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Api { status, .. } => RecipeError::Upstream(status),
            ProviderError::EmptyResult => RecipeError::EmptyUpstreamResult,
            other => RecipeError::Internal(anyhow::Error::new(other)),
        }
    }
}

impl IntoResponse for RecipeError {
    fn into_response(self) -> Response {
        let status = self.status();

        match &self {
            RecipeError::MethodNotAllowed => {
                return (status, [(header::ALLOW, "POST")], self.to_string()).into_response();
            }
            RecipeError::Configuration => {
                tracing::error!("GEMINI_API_KEY is not configured; rejecting recipe request");
            }
            RecipeError::InvalidJson(detail) => {
                tracing::debug!(error = %detail, "Rejected request body");
            }
            RecipeError::Internal(err) => {
                tracing::error!(error = ?err, "Recipe generation failed");
            }
            _ => {}
        }

        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_of(err: RecipeError) -> (StatusCode, Option<String>, String) {
        let response = err.into_response();
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .map(|v| v.to_str().unwrap().to_string());
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, content_type, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn json_errors_carry_the_public_message() {
        let cases = [
            (
                RecipeError::Configuration,
                500,
                "Server configuration error: GEMINI_API_KEY not set.",
            ),
            (
                RecipeError::InvalidJson("eof".to_string()),
                400,
                "Invalid JSON body.",
            ),
            (
                RecipeError::InvalidInput,
                400,
                "Missing or invalid 'ingredients' in request body.",
            ),
            (
                RecipeError::Upstream(StatusCode::SERVICE_UNAVAILABLE),
                503,
                "Gemini API failed to generate content.",
            ),
            (
                RecipeError::EmptyUpstreamResult,
                500,
                "Gemini returned no structured content.",
            ),
            (
                RecipeError::MalformedUpstreamResult,
                500,
                "Gemini returned malformed JSON.",
            ),
            (
                RecipeError::Internal(anyhow::anyhow!("connection reset")),
                500,
                "Internal server error during recipe generation.",
            ),
        ];

        for (err, expected_status, expected_message) in cases {
            let (status, content_type, body) = body_of(err).await;
            let parsed: ErrorResponse = serde_json::from_str(&body).unwrap();

            assert_eq!(status.as_u16(), expected_status);
            assert_eq!(content_type.as_deref(), Some("application/json"));
            assert_eq!(parsed.error, expected_message);
        }
    }

    #[tokio::test]
    async fn method_not_allowed_is_plain_text() {
        let response = RecipeError::MethodNotAllowed.into_response();
        assert_eq!(response.headers()[header::ALLOW], "POST");

        let (status, content_type, body) = body_of(RecipeError::MethodNotAllowed).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert!(content_type.unwrap().starts_with("text/plain"));
        assert_eq!(body, "Method Not Allowed");
    }

    #[tokio::test]
    async fn internal_detail_is_not_disclosed() {
        let (_, _, body) = body_of(RecipeError::Internal(anyhow::anyhow!("secret-host:443 refused"))).await;
        assert!(!body.contains("secret-host"));
    }

    #[test]
    fn provider_errors_map_onto_request_errors() {
        let upstream = RecipeError::from(ProviderError::Api {
            status: StatusCode::TOO_MANY_REQUESTS,
            body: "quota".to_string(),
        });
        assert!(matches!(upstream, RecipeError::Upstream(StatusCode::TOO_MANY_REQUESTS)));

        assert!(matches!(
            RecipeError::from(ProviderError::EmptyResult),
            RecipeError::EmptyUpstreamResult
        ));
        assert!(matches!(
            RecipeError::from(ProviderError::Network("timed out".to_string())),
            RecipeError::Internal(_)
        ));
        assert!(matches!(
            RecipeError::from(ProviderError::Decode("expected value".to_string())),
            RecipeError::Internal(_)
        ));
    }
}
