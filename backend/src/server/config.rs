//! Application configuration loaded from the environment.

use std::env;

use thiserror::Error;
use tracing::warn;

const DEFAULT_DB_NAME: &str = "ecommerce";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Deployment settings shared by the API server and the console worker.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// MongoDB connection string.
    pub mongodb_uri: String,
    /// Database name, defaulting to `ecommerce`.
    pub db_name: String,
    /// Socket address the HTTP server binds to.
    pub bind_addr: String,
    /// Shared secret for admin HTTP routes; `None` disables them.
    pub admin_api_key: Option<String>,
    /// Telegram bot token; `None` disables notifications and the console.
    pub telegram_token: Option<String>,
    /// Telegram usernames allowed to drive the admin console.
    pub admin_usernames: Vec<String>,
    /// Chat ids that receive order notifications.
    pub admin_chat_ids: Vec<i64>,
}

/// Failures raised while reading the environment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A required variable is unset or blank.
    #[error("required environment variable {name} is not set")]
    MissingVar { name: &'static str },
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    optional(name).ok_or(ConfigError::MissingVar { name })
}

/// Unset and blank values both read as absent.
fn optional(name: &'static str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

fn split_csv(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_owned)
        .collect()
}

fn parse_chat_ids(value: &str) -> Vec<i64> {
    split_csv(value)
        .into_iter()
        .filter_map(|entry| match entry.parse::<i64>() {
            Ok(id) => Some(id),
            Err(_) => {
                warn!(entry = %entry, "skipping non-numeric admin chat id");
                None
            }
        })
        .collect()
}

impl AppConfig {
    /// Read the configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            mongodb_uri: required("MONGODB_URI")?,
            db_name: optional("DB_NAME").unwrap_or_else(|| DEFAULT_DB_NAME.to_owned()),
            bind_addr: optional("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_owned()),
            admin_api_key: optional("ADMIN_API_KEY"),
            telegram_token: optional("TELEGRAM_BOT_TOKEN"),
            admin_usernames: optional("ADMIN_USERNAMES")
                .map_or_else(Vec::new, |raw| split_csv(&raw)),
            admin_chat_ids: optional("ADMIN_CHAT_IDS")
                .map_or_else(Vec::new, |raw| parse_chat_ids(&raw)),
        })
    }
}
