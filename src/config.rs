//! Configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup, validated, and then passed
//! explicitly to the logger. Nothing reads the environment while requests
//! are being handled.
//!
//! ## Variables
//!
//! ```bash
//! export LISTEN="0.0.0.0:3000"
//! export RUST_LOG="info"
//! export LOG_FORMAT="json"
//!
//! export REQUEST_LOG_LEVEL="info"          # debug | info | warn | error
//! export REQUEST_LOG_START="false"         # also log when the request arrives
//! export REQUEST_LOG_DEBUG_FIELDS="false"  # client_ip/client_version/params at any level
//! export REQUEST_ID_HEADER="x-request-id"
//!
//! export LOG_FILTERED_KEYS="password,token,card_number"
//! export LOG_SUPPRESSED_FIELDS="api_version"
//! ```
//!
//! All variables are optional.

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::env;

use crate::domain::{LogLevel, fields};

/// Redaction and suppression settings for request records.
///
/// An empty configuration filters nothing and suppresses nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterConfig {
    /// Parameter keys whose values are replaced by `[FILTERED]`, at any depth.
    pub filtered_keys: HashSet<String>,
    /// Base fields left out of every request record.
    pub suppressed_fields: HashSet<String>,
}

impl FilterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filtered_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filtered_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_suppressed_fields<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.suppressed_fields = names.into_iter().map(Into::into).collect();
        self
    }

    /// Reads `LOG_FILTERED_KEYS` and `LOG_SUPPRESSED_FIELDS`.
    pub fn from_env() -> Self {
        Self {
            filtered_keys: env::var("LOG_FILTERED_KEYS")
                .map(|v| parse_list(&v))
                .unwrap_or_default(),
            suppressed_fields: env::var("LOG_SUPPRESSED_FIELDS")
                .map(|v| parse_list(&v))
                .unwrap_or_default(),
        }
    }
}

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    /// Tier requested for request records.
    pub request_log_level: LogLevel,
    /// Emit an extra record, without duration, as soon as a request arrives.
    pub log_request: bool,
    /// Include the debug field set regardless of tier.
    pub include_debug_logging: bool,
    /// Header carrying the correlation id.
    pub request_id_header: String,
    pub filter: FilterConfig,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `REQUEST_LOG_LEVEL` is not a known tier.
    pub fn from_env() -> Result<Self> {
        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let request_log_level = match env::var("REQUEST_LOG_LEVEL") {
            Ok(v) => v
                .parse::<LogLevel>()
                .with_context(|| format!("Invalid REQUEST_LOG_LEVEL '{v}'"))?,
            Err(_) => LogLevel::Info,
        };

        let log_request = env_flag("REQUEST_LOG_START");
        let include_debug_logging = env_flag("REQUEST_LOG_DEBUG_FIELDS");

        let request_id_header =
            env::var("REQUEST_ID_HEADER").unwrap_or_else(|_| "x-request-id".to_string());

        Ok(Self {
            listen_addr,
            log_level,
            log_format,
            request_log_level,
            log_request,
            include_debug_logging,
            request_id_header,
            filter: FilterConfig::from_env(),
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is not `host:port`
    /// - `request_id_header` is empty
    /// - a suppressed field is not one of the base record fields
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if self.request_id_header.trim().is_empty() {
            anyhow::bail!("REQUEST_ID_HEADER must not be empty");
        }

        let mut unknown: Vec<&str> = self
            .filter
            .suppressed_fields
            .iter()
            .map(String::as_str)
            .filter(|name| !fields::BASE.contains(name))
            .collect();
        if !unknown.is_empty() {
            unknown.sort_unstable();
            anyhow::bail!(
                "LOG_SUPPRESSED_FIELDS may only name base fields ({}), got: {}",
                fields::BASE.join(", "),
                unknown.join(", ")
            );
        }

        Ok(())
    }

    /// Prints a configuration summary. Filtered key names are listed, they
    /// are not secrets themselves.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
        tracing::info!("  Request log level: {}", self.request_log_level);
        tracing::info!("  Request start records: {}", self.log_request);
        tracing::info!("  Forced debug fields: {}", self.include_debug_logging);
        tracing::info!("  Request id header: {}", self.request_id_header);
        tracing::info!("  Filtered keys: {}", sorted(&self.filter.filtered_keys));
        tracing::info!(
            "  Suppressed fields: {}",
            sorted(&self.filter.suppressed_fields)
        );
    }
}

/// Splits a comma-separated list, trimming blanks and dropping empties.
fn parse_list(raw: &str) -> HashSet<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn env_flag(name: &str) -> bool {
    env::var(name)
        .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
        .unwrap_or(false)
}

fn sorted(set: &HashSet<String>) -> String {
    let mut items: Vec<&str> = set.iter().map(String::as_str).collect();
    items.sort_unstable();
    if items.is_empty() {
        "-".to_string()
    } else {
        items.join(", ")
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if a variable can't be parsed or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
