use recipe_service::config::RecipeConfig;
use recipe_service::services::metrics::init_metrics;
use recipe_service::startup::Application;
use service_core::observability::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = RecipeConfig::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    let _tracing = init_tracing(
        "recipe-service",
        &config.common.log_level,
        config.otlp_endpoint.as_deref(),
    )?;

    init_metrics();

    let app = Application::build(config).await?;
    app.run_until_stopped().await?;

    Ok(())
}
