//! # Configuration Module
//!
//! This module defines configuration structures for the bot process and the
//! listing extractor, including the required Telegram token, HTTP client
//! parameters and reply limits.

use anyhow::{bail, Result};
use std::env;
use std::time::Duration;

// Constants for extractor configuration
pub const DEFAULT_SITE_ORIGIN: &str = "https://m.encar.com";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; EncarBot/1.0)";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_MAX_PHOTOS: usize = 5;
pub const DEFAULT_LANGUAGE: &str = "ru";

// Environment variable names
pub const TOKEN_ENV_VAR: &str = "TELEGRAM_TOKEN";
pub const LANGUAGE_ENV_VAR: &str = "BOT_LANGUAGE";
pub const LOG_FORMAT_ENV_VAR: &str = "LOG_FORMAT";

/// Configuration for fetching and scraping a listing page
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    /// Origin prepended to root-relative image paths
    pub site_origin: String,
    /// Value of the `User-Agent` header sent with every request
    pub user_agent: String,
    /// Upper bound for the whole request, including the body read
    pub request_timeout_secs: u64,
}

impl ExtractorConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            site_origin: DEFAULT_SITE_ORIGIN.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

/// Log output format selected at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Plain,
    Json,
}

impl LogFormat {
    fn parse(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()) {
            Some(v) if v == "json" => LogFormat::Json,
            _ => LogFormat::Plain,
        }
    }
}

/// Startup configuration for the bot process
#[derive(Clone)]
pub struct BotConfig {
    /// Telegram bot token
    pub telegram_token: String,
    /// Language used for every reply
    pub language: String,
    /// Maximum number of photos sent back per listing
    pub max_photos: usize,
    /// Log output format
    pub log_format: LogFormat,
    /// Extractor settings
    pub extractor: ExtractorConfig,
}

// The token must never end up in logs.
impl std::fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotConfig")
            .field("telegram_token", &"<redacted>")
            .field("language", &self.language)
            .field("max_photos", &self.max_photos)
            .field("log_format", &self.log_format)
            .field("extractor", &self.extractor)
            .finish()
    }
}

impl BotConfig {
    /// Create a configuration with defaults around an explicit token
    pub fn with_token(telegram_token: impl Into<String>) -> Self {
        Self {
            telegram_token: telegram_token.into(),
            language: DEFAULT_LANGUAGE.to_string(),
            max_photos: DEFAULT_MAX_PHOTOS,
            log_format: LogFormat::Plain,
            extractor: ExtractorConfig::default(),
        }
    }

    /// Build the configuration from process environment variables
    ///
    /// Call `dotenv::dotenv()` first if a `.env` file should be honored.
    ///
    /// # Errors
    ///
    /// Returns an error when `TELEGRAM_TOKEN` is missing or blank.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = match lookup(TOKEN_ENV_VAR) {
            Some(token) if !token.trim().is_empty() => token.trim().to_string(),
            _ => bail!("{TOKEN_ENV_VAR} must be set"),
        };

        let mut config = Self::with_token(token);

        if let Some(language) = lookup(LANGUAGE_ENV_VAR).filter(|l| !l.trim().is_empty()) {
            config.language = language.trim().to_string();
        }
        config.log_format = LogFormat::parse(lookup(LOG_FORMAT_ENV_VAR).as_deref());

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_missing_token_is_fatal() {
        assert!(BotConfig::from_lookup(lookup_from(&[])).is_err());
        assert!(BotConfig::from_lookup(lookup_from(&[(TOKEN_ENV_VAR, "   ")])).is_err());
    }

    #[test]
    fn test_defaults_from_token_only() {
        let config = BotConfig::from_lookup(lookup_from(&[(TOKEN_ENV_VAR, "123:abc")])).unwrap();
        assert_eq!(config.telegram_token, "123:abc");
        assert_eq!(config.language, "ru");
        assert_eq!(config.max_photos, 5);
        assert_eq!(config.log_format, LogFormat::Plain);
        assert_eq!(config.extractor.request_timeout(), Duration::from_secs(15));
        assert_eq!(config.extractor.site_origin, "https://m.encar.com");
    }

    #[test]
    fn test_optional_overrides() {
        let config = BotConfig::from_lookup(lookup_from(&[
            (TOKEN_ENV_VAR, "123:abc"),
            (LANGUAGE_ENV_VAR, "en"),
            (LOG_FORMAT_ENV_VAR, "JSON"),
        ]))
        .unwrap();
        assert_eq!(config.language, "en");
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = BotConfig::with_token("secret-token");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("secret-token"));
        assert!(rendered.contains("<redacted>"));
    }
}
