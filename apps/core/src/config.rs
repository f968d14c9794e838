//! Runtime configuration, read from the environment (and `.env` when present).

use crate::error::AppError;
use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use validator::Validate;

const DEFAULT_DATABASE_URL: &str = "sqlite://data/mindflow.sqlite";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8001";
const DEFAULT_LLM_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_LLM_MODEL: &str = "gpt-4o-mini";

/// Output format of the tracing subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" | "bunyan" => Ok(LogFormat::Json),
            other => Err(AppError::Config(format!("Unknown LOG_FORMAT: {}", other))),
        }
    }
}

/// Settings for the external chat-completions service.
#[derive(Debug, Clone, Validate)]
pub struct LlmConfig {
    /// Base URL of an OpenAI-compatible API (e.g. `https://api.openai.com/v1`).
    #[validate(url)]
    pub base_url: String,
    /// Bearer token. Without one the therapist answers from local templates only.
    pub api_key: Option<String>,
    /// Model identifier sent with every request.
    #[validate(length(min = 1))]
    pub model: String,
    /// Controls the creativity of the model's responses. Value between 0.0 and 2.0.
    #[validate(range(min = 0.0, max = 2.0))]
    pub temperature: f32,
    /// Per-request timeout in seconds.
    #[validate(range(min = 1, max = 600))]
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_LLM_BASE_URL.to_string(),
            api_key: None,
            model: DEFAULT_LLM_MODEL.to_string(),
            temperature: 0.7,
            timeout_secs: 30,
        }
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, Validate)]
pub struct AppConfig {
    /// sqlx connection string, e.g. `sqlite://data/mindflow.sqlite`.
    #[validate(length(min = 1))]
    pub database_url: String,
    pub bind_addr: SocketAddr,
    /// Allowed CORS origins; `*` allows any.
    pub cors_origins: Vec<String>,
    #[validate(nested)]
    pub llm: LlmConfig,
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Build the configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, AppError> {
        let bind_addr = var_or("BIND_ADDR", DEFAULT_BIND_ADDR);
        let bind_addr = bind_addr
            .parse::<SocketAddr>()
            .map_err(|e| AppError::Config(format!("Invalid BIND_ADDR '{}': {}", bind_addr, e)))?;

        let cors_origins = var_or("CORS_ORIGINS", "*")
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        let llm = LlmConfig {
            base_url: var_or("LLM_BASE_URL", DEFAULT_LLM_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
            api_key: env::var("LLM_API_KEY").ok().filter(|key| !key.trim().is_empty()),
            model: var_or("LLM_MODEL", DEFAULT_LLM_MODEL),
            temperature: parse_var("LLM_TEMPERATURE", 0.7)?,
            timeout_secs: parse_var("LLM_TIMEOUT_SECS", 30)?,
        };

        let config = Self {
            database_url: var_or("DATABASE_URL", DEFAULT_DATABASE_URL),
            bind_addr,
            cors_origins,
            llm,
            log_format: var_or("LOG_FORMAT", "pretty").parse()?,
        };

        config
            .validate()
            .map_err(|e| AppError::Config(e.to_string()))?;

        Ok(config)
    }

    /// Whether any origin is allowed.
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.is_empty() || self.cors_origins.iter().any(|origin| origin == "*")
    }
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_var<T>(key: &str, default: T) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|e| AppError::Config(format!("Invalid {} '{}': {}", key, raw, e))),
        _ => Ok(default),
    }
}
