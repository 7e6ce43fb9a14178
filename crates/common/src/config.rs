use std::time::Duration;

use crate::error::AppError;

const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";
const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";

/// Global application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// OAuth token for the homework-review API
    pub practicum_token: String,

    /// Telegram bot token
    pub telegram_token: String,

    /// Chat that receives status updates and failure reports
    pub telegram_chat_id: String,

    /// Homework statuses endpoint
    pub endpoint: String,

    /// Telegram Bot API base URL (without the `/bot<token>` suffix)
    pub telegram_api_url: String,

    /// Delay between two polls in seconds (default: 600)
    pub retry_interval_secs: u64,

    /// `from_date` used until the first status change has been relayed
    pub initial_from_date: i64,

    /// Per-request HTTP timeout in seconds (default: 30)
    pub http_timeout_secs: u64,

    /// File the log is appended to, next to stdout
    pub log_file: String,
}

impl AppConfig {
    /// Load configuration from environment variables (and `.env`, if present).
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    ///
    /// All missing secrets are reported in a single [`AppError::Config`]. Empty
    /// values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let missing: Vec<&str> = ["PRACTICUM_TOKEN", "TELEGRAM_TOKEN", "TELEGRAM_CHAT_ID"]
            .into_iter()
            .filter(|&key| get(key).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(AppError::Config(format!(
                "missing environment variables: {}",
                missing.join(", ")
            )));
        }

        Ok(Self {
            practicum_token: get("PRACTICUM_TOKEN").unwrap_or_default(),
            telegram_token: get("TELEGRAM_TOKEN").unwrap_or_default(),
            telegram_chat_id: get("TELEGRAM_CHAT_ID").unwrap_or_default(),
            endpoint: get("PRACTICUM_ENDPOINT")
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            telegram_api_url: get("TELEGRAM_API_URL")
                .unwrap_or_else(|| DEFAULT_TELEGRAM_API_URL.to_string()),
            retry_interval_secs: parse_secs(
                get("RETRY_INTERVAL_SECS"),
                600,
                "RETRY_INTERVAL_SECS",
            )?,
            initial_from_date: parse_or(
                get("INITIAL_FROM_DATE"),
                1_630_000_000,
                "INITIAL_FROM_DATE",
            )?,
            http_timeout_secs: parse_secs(get("HTTP_TIMEOUT_SECS"), 30, "HTTP_TIMEOUT_SECS")?,
            log_file: get("LOG_FILE").unwrap_or_else(|| "program.log".to_string()),
        })
    }

    pub fn retry_interval(&self) -> Duration {
        Duration::from_secs(self.retry_interval_secs)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

fn parse_or<T: std::str::FromStr>(
    value: Option<String>,
    default: T,
    key: &str,
) -> Result<T, AppError> {
    match value {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::Config(format!("{key} must be a valid integer, got {raw:?}"))),
        None => Ok(default),
    }
}

/// Like [`parse_or`] for durations in seconds; zero is rejected.
fn parse_secs(value: Option<String>, default: u64, key: &str) -> Result<u64, AppError> {
    match parse_or(value, default, key)? {
        0 => Err(AppError::Config(format!("{key} must be greater than zero"))),
        secs => Ok(secs),
    }
}
