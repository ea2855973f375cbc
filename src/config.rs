//! Application configuration.
//!
//! Handles loading configuration from environment variables and .env files.

use chrono::{FixedOffset, Offset, Utc};
use dotenv::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::constants;
use crate::error::Result;

/// Configuration for the application.
#[derive(Debug, Clone)]
pub struct Config {
    /// The application name
    app_name: String,
    /// The application version
    app_version: String,
    /// `Planning Center` Online application ID
    pub pco_app_id: String,
    /// `Planning Center` Online secret
    pub pco_secret: String,
    /// Base URL the endpoint paths are joined to
    pub api_base_url: String,
    /// Lifetime of a cached fragment
    pub cache_ttl: Duration,
    /// Upstream request timeout
    pub http_timeout: Duration,
    /// `strftime` pattern for event dates
    pub date_format: String,
    /// Offset event dates are displayed in
    pub utc_offset: FixedOffset,
    /// Directory of the file-backed cache
    pub cache_dir: Option<PathBuf>,
}

impl Config {
    /// Get the application name.
    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Get the application version.
    #[must_use]
    pub fn app_version(&self) -> &str {
        &self.app_version
    }

    /// `User-Agent` header value sent upstream.
    #[must_use]
    pub fn user_agent(&self) -> String {
        format!("{}/{}", self.app_name, self.app_version)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: env!("CARGO_PKG_NAME").to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            pco_app_id: String::new(),
            pco_secret: String::new(),
            api_base_url: constants::api::DEFAULT_BASE_URL.to_string(),
            cache_ttl: Duration::from_secs(constants::cache::DEFAULT_TTL_SECS),
            http_timeout: Duration::from_secs(constants::api::DEFAULT_TIMEOUT_SECS),
            date_format: constants::html::DEFAULT_DATE_FORMAT.to_string(),
            utc_offset: utc(),
            cache_dir: dirs::cache_dir().map(|d| d.join(constants::cache::DIR_NAME)),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    #[allow(clippy::unnecessary_wraps)] // Returns Result for forward-compatible API
    pub fn load() -> Result<Self> {
        // Try to load .env file if present
        dotenv().ok();

        Ok(Self::from_lookup(|key| env::var(key).ok()))
    }

    /// Build a configuration from an arbitrary variable lookup.
    ///
    /// Unset variables keep their defaults; malformed values are logged and ignored.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(app_id) = lookup("PCO_APP_ID") {
            config.pco_app_id = app_id;
        }

        if let Some(secret) = lookup("PCO_SECRET") {
            config.pco_secret = secret;
        }

        if let Some(base) = lookup("PCO_API_BASE_URL").filter(|b| !b.trim().is_empty()) {
            config.api_base_url = base.trim().to_string();
        }

        if let Some(secs) = lookup("PCO_CACHE_TTL_SECS") {
            match secs.trim().parse::<u64>() {
                Ok(secs) => config.cache_ttl = Duration::from_secs(secs),
                Err(e) => tracing::warn!("Ignoring invalid PCO_CACHE_TTL_SECS {secs:?}: {e}"),
            }
        }

        if let Some(secs) = lookup("PCO_HTTP_TIMEOUT_SECS") {
            match secs.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.http_timeout = Duration::from_secs(secs),
                _ => tracing::warn!("Ignoring invalid PCO_HTTP_TIMEOUT_SECS {secs:?}"),
            }
        }

        if let Some(format) = lookup("PCO_DATE_FORMAT").filter(|f| !f.is_empty()) {
            config.date_format = format;
        }

        if let Some(offset) = lookup("PCO_UTC_OFFSET") {
            match parse_utc_offset(&offset) {
                Some(offset) => config.utc_offset = offset,
                None => tracing::warn!("Ignoring invalid PCO_UTC_OFFSET {offset:?}"),
            }
        }

        // Cache dir: env var override with ~ expansion, or the platform cache dir
        if let Some(dir) = lookup("PCO_CACHE_DIR").filter(|d| !d.trim().is_empty()) {
            config.cache_dir = Some(PathBuf::from(shellexpand::tilde(dir.trim()).to_string()));
        }

        config
    }

    /// Default configuration pointed at a specific API base with the given credentials.
    pub fn for_api(
        base_url: impl Into<String>,
        app_id: impl Into<String>,
        secret: impl Into<String>,
    ) -> Self {
        Self {
            pco_app_id: app_id.into(),
            pco_secret: secret.into(),
            api_base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Check if `Planning Center` is configured
    pub fn has_planning_center_credentials(&self) -> bool {
        !self.pco_app_id.is_empty() && !self.pco_secret.is_empty()
    }
}

fn utc() -> FixedOffset {
    Utc.fix()
}

/// Parse a display offset such as `+02:00`, `-0530`, `+9` or `UTC`.
pub fn parse_utc_offset(raw: &str) -> Option<FixedOffset> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("utc") || raw.eq_ignore_ascii_case("z") {
        return Some(utc());
    }

    let (sign, rest) = match raw.as_bytes().first().copied()? {
        b'+' => (1, &raw[1..]),
        b'-' => (-1, &raw[1..]),
        _ => return None,
    };
    if !rest.is_ascii() {
        return None;
    }

    let (hours, minutes) = match rest.split_once(':') {
        Some((h, m)) => (h, m),
        None if rest.len() == 4 => rest.split_at(2),
        None => (rest, "0"),
    };

    if hours.is_empty() || !hours.chars().chain(minutes.chars()).all(|c| c.is_ascii_digit()) {
        return None;
    }

    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}
