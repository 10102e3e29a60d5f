use std::str::FromStr;

use anyhow::{Context, Result};

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;
const DEFAULT_MAX_SESSION_BYTES: usize = 100 * 1024 * 1024;
const DEFAULT_SESSION_IDLE_SECS: u64 = 60 * 60;

/// Application configuration loaded from environment variables.
/// Fails at startup if the oracle credential is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub gemini_base_url: String,
    pub port: u16,
    pub rust_log: String,
    /// Body limit for a single upload request.
    pub max_upload_bytes: usize,
    /// Total payload one session may hold across all its uploads.
    pub max_session_bytes: usize,
    /// Sessions untouched for this long are dropped by the sweeper.
    pub session_idle_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            gemini_api_key: require_env("GEMINI_API_KEY")?,
            gemini_base_url: std::env::var("GEMINI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_BASE_URL.to_string()),
            port: optional_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            max_upload_bytes: optional_env("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            max_session_bytes: optional_env("MAX_SESSION_BYTES", DEFAULT_MAX_SESSION_BYTES)?,
            session_idle_secs: optional_env("SESSION_IDLE_SECS", DEFAULT_SESSION_IDLE_SECS)?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw}")),
        Err(_) => Ok(default),
    }
}
