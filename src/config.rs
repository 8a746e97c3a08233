//! Application configuration loaded from environment variables.

use crate::services::{CallbackConfig, HandoffConfig};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Cookie whose presence marks a signed-in browser.
pub const DEFAULT_SESSION_COOKIE: &str = "cd_token";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// Base URL of the diary backend API
    pub api_base_url: String,
    /// Directory holding the exported frontend
    pub static_dir: PathBuf,
    /// Session cookie checked by the path guard
    pub session_cookie_name: String,
    /// Send DUPLICATE_EMAIL logins to the notice page
    pub duplicate_email_notice: bool,
    /// Summary view poll interval (ms)
    pub diary_poll_interval_ms: u64,
    /// Summary view result deadline (ms)
    pub diary_result_timeout_ms: u64,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            port: 8080,
            api_base_url: "http://localhost:8081".to_string(),
            static_dir: PathBuf::from("./out"),
            session_cookie_name: DEFAULT_SESSION_COOKIE.to_string(),
            duplicate_email_notice: true,
            diary_poll_interval_ms: 150,
            diary_result_timeout_ms: 8000,
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl Config {
    /// Load configuration from environment variables (and `.env` if present).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let defaults = Self::default();

        let duplicate_email_notice = match env::var("DUPLICATE_EMAIL_NOTICE") {
            Ok(raw) => parse_bool(&raw).ok_or(ConfigError::Invalid("DUPLICATE_EMAIL_NOTICE"))?,
            Err(_) => defaults.duplicate_email_notice,
        };

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            api_base_url: env::var("API_BASE_URL")
                .map(|v| v.trim().trim_end_matches('/').to_string())
                .map_err(|_| ConfigError::Missing("API_BASE_URL"))?,
            static_dir: env::var("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.static_dir),
            session_cookie_name: env::var("SESSION_COOKIE_NAME")
                .unwrap_or_else(|_| DEFAULT_SESSION_COOKIE.to_string()),
            duplicate_email_notice,
            diary_poll_interval_ms: env::var("DIARY_POLL_INTERVAL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.diary_poll_interval_ms),
            diary_result_timeout_ms: env::var("DIARY_RESULT_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.diary_result_timeout_ms),
        })
    }

    pub fn handoff(&self) -> HandoffConfig {
        HandoffConfig {
            poll_interval: Duration::from_millis(self.diary_poll_interval_ms),
            result_timeout: Duration::from_millis(self.diary_result_timeout_ms),
        }
    }

    pub fn callback(&self) -> CallbackConfig {
        CallbackConfig {
            duplicate_email_notice: self.duplicate_email_notice,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}
