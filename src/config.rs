//! Runtime configuration parsed from environment variables.

use std::time::Duration;

pub const DEFAULT_HOST_URL: &str = "https://elitebot.dev";
pub const DEFAULT_PROFILE_UPDATE_INTERVAL_MS: u64 = 10 * 60 * 1000;
pub const DEFAULT_PROFILE_FETCH_DELAY_MS: u64 = 2000;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Errors produced while building [`RatesConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// `PUBLIC_HOST_URL` is not an absolute http(s) URL.
    #[error("invalid host URL: {0}")]
    InvalidHostUrl(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatesConfig {
    /// Base URL of the profile API, without a trailing slash.
    pub host_url: String,
    /// Minimum time between two profile refreshes for the same subject.
    pub profile_update_interval: Duration,
    /// Pacing delay applied before every profile request.
    pub fetch_delay: Duration,
    pub timeouts: HttpTimeouts,
}

impl Default for RatesConfig {
    fn default() -> Self {
        Self {
            host_url: DEFAULT_HOST_URL.to_string(),
            profile_update_interval: Duration::from_millis(DEFAULT_PROFILE_UPDATE_INTERVAL_MS),
            fetch_delay: Duration::from_millis(DEFAULT_PROFILE_FETCH_DELAY_MS),
            timeouts: HttpTimeouts {
                request_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
                connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            },
        }
    }
}

impl RatesConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `PUBLIC_HOST_URL`: default `https://elitebot.dev`
    /// - `PROFILE_UPDATE_INTERVAL_MS`: default 600000
    /// - `PROFILE_FETCH_DELAY_MS`: default 2000
    /// - `RATES_REQUEST_TIMEOUT_SECS`: default 30
    /// - `RATES_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidHostUrl`] if `PUBLIC_HOST_URL` is set but
    /// is not an absolute http(s) URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        let host_url = std::env::var("PUBLIC_HOST_URL").unwrap_or_else(|_| DEFAULT_HOST_URL.to_string());
        let host_url = normalize_host_url(&host_url)?;

        Ok(Self {
            host_url,
            profile_update_interval: Duration::from_millis(env_parse_u64(
                "PROFILE_UPDATE_INTERVAL_MS",
                DEFAULT_PROFILE_UPDATE_INTERVAL_MS,
            )),
            fetch_delay: Duration::from_millis(env_parse_u64("PROFILE_FETCH_DELAY_MS", DEFAULT_PROFILE_FETCH_DELAY_MS)),
            timeouts: HttpTimeouts {
                request_secs: env_parse_u64("RATES_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
                connect_secs: env_parse_u64("RATES_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
            },
        })
    }
}

/// Validate a host URL and strip trailing slashes.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidHostUrl`] for anything that is not an
/// absolute `http` or `https` URL.
pub fn normalize_host_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let parsed = reqwest::Url::parse(trimmed).map_err(|_| ConfigError::InvalidHostUrl(raw.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidHostUrl(raw.to_string()));
    }
    Ok(trimmed.to_string())
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
