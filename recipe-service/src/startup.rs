//! Application startup and lifecycle management.

use crate::config::RecipeConfig;
use crate::handlers::{
    health::health_check,
    metrics::metrics,
    not_found,
    recipes::{generate_recipes, GENERATE_RECIPES_PATH},
};
use crate::services::providers::gemini::{GeminiConfig, GeminiTextProvider};
use crate::services::providers::TextProvider;
use axum::{
    middleware::from_fn,
    routing::{any, get},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    request_id_middleware, security_headers_middleware, REQUEST_ID_HEADER,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;

/// Shared application state.
///
/// Read-only after startup. `text_provider` is `None` when no Gemini key was
/// configured.
#[derive(Clone)]
pub struct AppState {
    pub text_provider: Option<Arc<dyn TextProvider>>,
}

impl AppState {
    pub fn new(text_provider: Option<Arc<dyn TextProvider>>) -> Self {
        Self { text_provider }
    }

    /// Resolve the Gemini credential once and build the provider from it.
    pub fn from_config(config: &RecipeConfig) -> Result<Self, AppError> {
        let Some(api_key) = config.gemini.api_key.clone() else {
            tracing::warn!(
                "GEMINI_API_KEY not set; recipe requests will fail with a configuration error"
            );
            return Ok(Self::new(None));
        };

        let provider = GeminiTextProvider::new(GeminiConfig {
            api_key,
            model: config.gemini.model.clone(),
            base_url: config.gemini.base_url.clone(),
            timeout: config.gemini.timeout,
        })
        .map_err(|e| AppError::InternalError(anyhow::anyhow!(e)))?;

        tracing::info!(
            model = %provider.model(),
            timeout_secs = config.gemini.timeout.map(|t| t.as_secs()),
            "Initialized Gemini text provider"
        );

        Ok(Self::new(Some(Arc::new(provider))))
    }

    pub fn is_configured(&self) -> bool {
        self.text_provider.is_some()
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics))
        .route(GENERATE_RECIPES_PATH, any(generate_recipes))
        .fallback(not_found)
        .layer(from_fn(security_headers_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        // Outermost, so the trace span already sees the id.
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: RecipeConfig) -> Result<Self, AppError> {
        let state = AppState::from_config(&config)?;

        // Port 0 = random port for testing
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Recipe service: HTTP on port {}", port);

        Ok(Self {
            port,
            listener,
            router: build_router(state),
        })
    }

    /// Get the HTTP port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until a shutdown signal arrives.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                tracing::error!("HTTP server error: {}", e);
                e
            })
    }
}
