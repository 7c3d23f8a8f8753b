use secrecy::Secret;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::time::Duration;

pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

#[derive(Debug, Clone)]
pub struct RecipeConfig {
    pub common: core_config::Config,
    pub gemini: GeminiSettings,
    /// OTLP collector for traces; console logging only when unset.
    pub otlp_endpoint: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GeminiSettings {
    /// `None` keeps the service up but every recipe request answers with a
    /// configuration error.
    pub api_key: Option<Secret<String>>,
    pub model: String,
    pub base_url: String,
    /// Client-wide request timeout. Unset means the transport default.
    pub timeout: Option<Duration>,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_GEMINI_MODEL.to_string(),
            base_url: DEFAULT_GEMINI_API_BASE.to_string(),
            timeout: None,
        }
    }
}

impl RecipeConfig {
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;

        Ok(RecipeConfig {
            common,
            gemini: GeminiSettings {
                api_key: non_empty(env::var("GEMINI_API_KEY").ok()).map(Secret::new),
                model: get_env("GEMINI_MODEL", DEFAULT_GEMINI_MODEL),
                base_url: get_env("GEMINI_API_BASE", DEFAULT_GEMINI_API_BASE),
                timeout: parse_timeout_secs(env::var("GEMINI_TIMEOUT_SECS").ok())?,
            },
            otlp_endpoint: non_empty(env::var("OTLP_ENDPOINT").ok()),
        })
    }
}

fn get_env(key: &str, default: &str) -> String {
    non_empty(env::var(key).ok()).unwrap_or_else(|| default.to_string())
}

/// Unset and blank values are treated the same way.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_timeout_secs(value: Option<String>) -> Result<Option<Duration>, AppError> {
    match non_empty(value) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map(|secs| Some(Duration::from_secs(secs)))
            .map_err(|e| {
                AppError::ConfigError(anyhow::anyhow!(
                    "GEMINI_TIMEOUT_SECS must be a whole number of seconds, got '{}': {}",
                    raw,
                    e
                ))
            }),
    }
}
