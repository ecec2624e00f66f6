//! Configuration management for the Booking MCP Server.
//!
//! This module handles loading and validating configuration from environment variables.
//! It avoids polluting stdout (which MCP uses for communication) by loading the
//! .env file silently if present.

use crate::domain::EmailAddress;
use crate::error::{ConfigError, ConfigResult};
use crate::validation::region::{parse_postal_ranges, DEFAULT_KEYWORDS, DEFAULT_POSTAL_RANGES};
use crate::validation::DEFAULT_MAX_LENGTH;
use std::env;
use std::ops::RangeInclusive;
use tracing_subscriber::EnvFilter;

const DEFAULT_MAIL_API_URL: &str = "https://api.resend.com/emails";

/// Configuration for the Booking MCP Server.
#[derive(Debug, Clone)]
pub struct Config {
    /// Mail API send endpoint
    pub mail_api_url: String,

    /// Mail API key for bearer authentication
    pub mail_api_key: String,

    /// Sender of booking notifications
    pub mail_from: EmailAddress,

    /// Recipients of booking notifications (at least one)
    pub mail_to: Vec<EmailAddress>,

    /// Bounded wait on the notifier in seconds (default: 10)
    pub notifier_timeout_secs: u64,

    /// Requests admitted per client per window (default: 5)
    pub rate_limit_max: usize,

    /// Rate limit window in seconds (default: 900)
    pub rate_limit_window_secs: u64,

    /// Sweep the rate limiter every N admissions, 0 disables (default: 100)
    pub rate_limit_cleanup_every: u64,

    /// Sanitizer bound for the name field (default: 200)
    pub max_name_length: usize,

    /// Sanitizer bound for the address field (default: 200)
    pub max_address_length: usize,

    /// Human-readable region name used in replies (default: "San Francisco")
    pub region_name: String,

    /// Region keywords, matched on whole words
    pub region_keywords: Vec<String>,

    /// Inclusive postal code ranges inside the region
    pub region_postal_ranges: Vec<RangeInclusive<u32>>,

    /// Log level (default: "error")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `MAIL_API_KEY`: API key for the mail service
    /// - `MAIL_FROM`: sender address
    /// - `MAIL_TO`: comma-separated recipient addresses
    ///
    /// Optional environment variables:
    /// - `MAIL_API_URL`: send endpoint (default: Resend)
    /// - `NOTIFIER_TIMEOUT_SECS`: notifier timeout (default: 10)
    /// - `RATE_LIMIT_MAX`: requests per window (default: 5)
    /// - `RATE_LIMIT_WINDOW_SECS`: window length (default: 900)
    /// - `RATE_LIMIT_CLEANUP_EVERY`: sweep cadence (default: 100)
    /// - `MAX_NAME_LENGTH` / `MAX_ADDRESS_LENGTH`: sanitizer bounds (default: 200)
    /// - `REGION_NAME`, `REGION_KEYWORDS`, `REGION_POSTAL_RANGES`: service region
    /// - `LOG_LEVEL`: Logging level (default: "error")
    pub fn from_env() -> ConfigResult<Self> {
        // Try to load .env file if it exists (but don't fail if it doesn't)
        let _ = dotenvy::dotenv();

        let mail_api_url =
            env::var("MAIL_API_URL").unwrap_or_else(|_| DEFAULT_MAIL_API_URL.to_string());

        if !mail_api_url.starts_with("http://") && !mail_api_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                var: "MAIL_API_URL".to_string(),
                reason: "Must start with http:// or https://".to_string(),
            });
        }

        let mail_api_key = env::var("MAIL_API_KEY")
            .map_err(|_| ConfigError::MissingVar("MAIL_API_KEY".to_string()))?;

        if mail_api_key.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                var: "MAIL_API_KEY".to_string(),
                reason: "Cannot be empty".to_string(),
            });
        }

        let mail_from = env::var("MAIL_FROM")
            .map_err(|_| ConfigError::MissingVar("MAIL_FROM".to_string()))?;
        let mail_from = Self::parse_email("MAIL_FROM", &mail_from)?;

        let mail_to = env::var("MAIL_TO")
            .map_err(|_| ConfigError::MissingVar("MAIL_TO".to_string()))?;
        let mail_to = Self::parse_email_list("MAIL_TO", &mail_to)?;

        let notifier_timeout_secs = Self::parse_env_u64("NOTIFIER_TIMEOUT_SECS", 10)?;
        let rate_limit_max = Self::parse_env_usize("RATE_LIMIT_MAX", 5)?;
        let rate_limit_window_secs = Self::parse_env_u64("RATE_LIMIT_WINDOW_SECS", 900)?;
        let rate_limit_cleanup_every = Self::parse_env_u64("RATE_LIMIT_CLEANUP_EVERY", 100)?;
        let max_name_length = Self::parse_env_usize("MAX_NAME_LENGTH", DEFAULT_MAX_LENGTH)?;
        let max_address_length = Self::parse_env_usize("MAX_ADDRESS_LENGTH", DEFAULT_MAX_LENGTH)?;

        for (var, value) in [
            ("NOTIFIER_TIMEOUT_SECS", notifier_timeout_secs),
            ("RATE_LIMIT_MAX", rate_limit_max as u64),
            ("RATE_LIMIT_WINDOW_SECS", rate_limit_window_secs),
        ] {
            if value == 0 {
                return Err(ConfigError::InvalidValue {
                    var: var.to_string(),
                    reason: "Must be at least 1".to_string(),
                });
            }
        }

        let region_name = env::var("REGION_NAME").unwrap_or_else(|_| "San Francisco".to_string());

        let region_keywords = match env::var("REGION_KEYWORDS") {
            Ok(val) => Self::split_list(&val),
            Err(_) => DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect(),
        };

        let ranges = env::var("REGION_POSTAL_RANGES")
            .unwrap_or_else(|_| DEFAULT_POSTAL_RANGES.to_string());
        let region_postal_ranges =
            parse_postal_ranges(&ranges).map_err(|reason| ConfigError::InvalidValue {
                var: "REGION_POSTAL_RANGES".to_string(),
                reason,
            })?;

        if region_keywords.is_empty() && region_postal_ranges.is_empty() {
            return Err(ConfigError::InvalidValue {
                var: "REGION_KEYWORDS".to_string(),
                reason: "At least one keyword or postal range is required".to_string(),
            });
        }

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "error".to_string());
        if let Err(e) = EnvFilter::try_new(&log_level) {
            return Err(ConfigError::InvalidValue {
                var: "LOG_LEVEL".to_string(),
                reason: e.to_string(),
            });
        }

        Ok(Config {
            mail_api_url,
            mail_api_key,
            mail_from,
            mail_to,
            notifier_timeout_secs,
            rate_limit_max,
            rate_limit_window_secs,
            rate_limit_cleanup_every,
            max_name_length,
            max_address_length,
            region_name,
            region_keywords,
            region_postal_ranges,
            log_level,
        })
    }

    /// Log filter: `RUST_LOG` when set, otherwise `LOG_LEVEL`.
    pub fn log_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&self.log_level))
            .unwrap_or_else(|_| EnvFilter::new("error"))
    }

    fn parse_email(var_name: &str, value: &str) -> ConfigResult<EmailAddress> {
        EmailAddress::new(value.trim()).map_err(|e| ConfigError::InvalidValue {
            var: var_name.to_string(),
            reason: e.to_string(),
        })
    }

    fn parse_email_list(var_name: &str, value: &str) -> ConfigResult<Vec<EmailAddress>> {
        let emails = Self::split_list(value)
            .iter()
            .map(|email| Self::parse_email(var_name, email))
            .collect::<ConfigResult<Vec<_>>>()?;

        if emails.is_empty() {
            return Err(ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: "At least one address is required".to_string(),
            });
        }

        Ok(emails)
    }

    fn split_list(value: &str) -> Vec<String> {
        value
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }

    /// Parse an environment variable as usize with a default value.
    fn parse_env_usize(var_name: &str, default: usize) -> ConfigResult<usize> {
        match env::var(var_name) {
            Ok(val) => val.parse::<usize>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }
}
