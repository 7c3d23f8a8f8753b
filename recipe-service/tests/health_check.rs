//! Integration tests for the recipe-service HTTP surface.
//!
//! The application is started on a random port; no Gemini call is made.

use recipe_service::config::{GeminiSettings, RecipeConfig};
use recipe_service::startup::Application;
use reqwest::Client;
use secrecy::Secret;
use service_core::config::Config;
use std::time::Duration;

/// Spawn the application on a random port and return the port number.
async fn spawn_app(gemini: GeminiSettings) -> u16 {
    let config = RecipeConfig {
        common: Config {
            port: 0, // Random port
            log_level: "error".to_string(),
        },
        gemini,
        otlp_endpoint: None,
    };

    let app = Application::build(config)
        .await
        .expect("Failed to build application");

    let port = app.port();

    // Spawn the server in the background
    tokio::spawn(async move {
        let _ = app.run_until_stopped().await;
    });

    port
}

fn configured_gemini() -> GeminiSettings {
    GeminiSettings {
        api_key: Some(Secret::new("test-api-key".to_string())),
        base_url: "http://127.0.0.1:1/v1beta".to_string(),
        ..GeminiSettings::default()
    }
}

#[tokio::test]
async fn health_check_returns_ok() {
    let port = spawn_app(configured_gemini()).await;
    let client = Client::new();

    let response = client
        .get(format!("http://127.0.0.1:{}/health", port))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    assert!(response.headers().contains_key("x-request-id"));

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "recipe-service");
    assert_eq!(body["gemini_configured"], true);
}

#[tokio::test]
async fn health_check_reports_missing_key() {
    let port = spawn_app(GeminiSettings::default()).await;

    let body: serde_json::Value = Client::new()
        .get(format!("http://127.0.0.1:{}/health", port))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse JSON");

    assert_eq!(body["status"], "ok");
    assert_eq!(body["gemini_configured"], false);
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let port = spawn_app(configured_gemini()).await;

    let response = Client::new()
        .get(format!("http://127.0.0.1:{}/nope", port))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["error"], "Not found");
}

#[tokio::test]
async fn metrics_endpoint_serves_text() {
    recipe_service::services::metrics::init_metrics();
    let port = spawn_app(configured_gemini()).await;

    let response = Client::new()
        .get(format!("http://127.0.0.1:{}/metrics", port))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let text = response.text().await.expect("Failed to read body");
    assert!(!text.contains("not initialized"));
}
