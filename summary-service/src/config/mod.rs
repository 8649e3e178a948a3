use axum::http::HeaderValue;
use secrecy::Secret;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_TEMPERATURE: f32 = 0.3;

/// Production web app and the local Vite dev server.
pub const DEFAULT_ALLOWED_ORIGINS: &str = "https://halo-hospital.netlify.app,http://localhost:5173";

#[derive(Debug, Clone)]
pub struct SummaryConfig {
    pub common: core_config::Config,
    pub openai: OpenAiConfig,
    pub cors: CorsConfig,
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: Secret<String>,
    /// Chat model identifier (e.g., gpt-3.5-turbo)
    pub model: String,
    /// Base URL of an OpenAI-compatible API, without trailing `/chat/completions`
    pub base_url: String,
    pub temperature: f32,
}

#[derive(Debug, Clone)]
pub struct CorsConfig {
    /// Origins compared by exact string match against the `Origin` header.
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    pub otlp_endpoint: Option<String>,
}

impl SummaryConfig {
    /// Load the full configuration from the process environment (and `.env`).
    ///
    /// Must complete before the listener is bound; the result is the only
    /// source of the upstream credential.
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;
        Self::from_lookup(common, |key| env::var(key).ok())
    }

    /// Build the service section from an arbitrary key lookup.
    pub fn from_lookup<F>(common: core_config::Config, lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let is_prod = lookup("ENVIRONMENT").unwrap_or_else(|| "dev".to_string()) == "prod";
        let get = |key: &str, default: Option<&str>| get_env(&lookup, key, default, is_prod);

        let api_key = get("OPENAI_API_KEY", None)?;
        if api_key.trim().is_empty() {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "OPENAI_API_KEY must not be empty"
            )));
        }

        let temperature = parse_temperature(&get(
            "SUMMARY_TEMPERATURE",
            Some(&DEFAULT_TEMPERATURE.to_string()),
        )?)?;

        let allowed_origins = parse_origins(&get(
            "CORS_ALLOWED_ORIGINS",
            Some(DEFAULT_ALLOWED_ORIGINS),
        )?)?;

        Ok(SummaryConfig {
            common,
            openai: OpenAiConfig {
                api_key: Secret::new(api_key),
                model: get("OPENAI_MODEL", Some(DEFAULT_MODEL))?,
                base_url: get("OPENAI_BASE_URL", Some(DEFAULT_BASE_URL))?
                    .trim_end_matches('/')
                    .to_string(),
                temperature,
            },
            cors: CorsConfig { allowed_origins },
            observability: ObservabilityConfig {
                otlp_endpoint: lookup("OTLP_ENDPOINT").filter(|v| !v.trim().is_empty()),
            },
        })
    }
}

fn get_env<F>(lookup: &F, key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(val) => Ok(val),
        None => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}

fn parse_temperature(raw: &str) -> Result<f32, AppError> {
    let value: f32 = raw.trim().parse().map_err(|e| {
        AppError::ConfigError(anyhow::anyhow!("SUMMARY_TEMPERATURE '{}': {}", raw, e))
    })?;

    if !(0.0..=2.0).contains(&value) {
        return Err(AppError::ConfigError(anyhow::anyhow!(
            "SUMMARY_TEMPERATURE must be within 0.0..=2.0, got {}",
            value
        )));
    }

    Ok(value)
}

fn parse_origins(raw: &str) -> Result<Vec<String>, AppError> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(|origin| {
            let is_http = origin.starts_with("http://") || origin.starts_with("https://");
            if !is_http || origin.ends_with('/') || HeaderValue::from_str(origin).is_err() {
                return Err(AppError::ConfigError(anyhow::anyhow!(
                    "Invalid CORS origin '{}': expected scheme://host[:port]",
                    origin
                )));
            }
            Ok(origin.to_string())
        })
        .collect()
}
