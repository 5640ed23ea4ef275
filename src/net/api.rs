//! Profile refresh helper for `/api/profiles/{uuid}`.
//!
//! DESIGN
//! ======
//! One call makes at most one GET. The caller's `last_fetched` timestamp is
//! a cheap client-side rate limit; when it is too recent nothing is sent.
//! Otherwise the helper waits a fixed pacing delay (not a backoff), sends
//! the request, and keeps the body only if it parses and reports success.
//!
//! ERROR HANDLING
//! ==============
//! [`ProfileFetcher::fetch_new_profiles`] returns `None` for every failure:
//! too soon, transport error, non-200, bad JSON, or `success` not set.
//! Callers cannot tell these apart from the `Option`. Use
//! [`ProfileFetcher::fetch_outcome`] when the reason matters.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::time::Duration;

use super::types::{FetchError, HttpResponse, Profiles};
use crate::config::RatesConfig;

/// Pacing delay used when the caller has no preference.
pub const DEFAULT_FETCH_DELAY: Duration = Duration::from_millis(2000);

// =============================================================================
// TRANSPORT
// =============================================================================

/// Single-request HTTP seam. Errors are transport failures only; any HTTP
/// status is a successful exchange.
#[async_trait::async_trait]
pub trait HttpTransport: Send + Sync {
    async fn get(&self, url: &str) -> Result<HttpResponse, FetchError>;
}

pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a client with the configured timeouts.
    ///
    /// # Errors
    ///
    /// Returns an error if the reqwest client fails to build.
    pub fn new(config: &RatesConfig) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| FetchError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http })
    }
}

#[async_trait::async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse, FetchError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Request(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Request(e.to_string()))?;
        Ok(HttpResponse { status, body })
    }
}

// =============================================================================
// OUTCOME
// =============================================================================

/// Why a refresh did or did not produce profiles.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// `last_fetched` is newer than the update interval. No request was sent.
    RateLimited { elapsed_ms: i64 },
    /// The request never completed.
    Network(FetchError),
    /// The server answered with something other than 200.
    HttpStatus(u16),
    /// The body was not JSON.
    Parse(String),
    /// JSON parsed but `success` was missing or falsy.
    Unsuccessful,
    Ok(Profiles),
}

impl FetchOutcome {
    /// Stable diagnostic code for logs and CLI output.
    #[must_use]
    pub fn reason(&self) -> &'static str {
        match self {
            Self::RateLimited { .. } => "rate_limited",
            Self::Network(_) => "network",
            Self::HttpStatus(_) => "http_status",
            Self::Parse(_) => "parse",
            Self::Unsuccessful => "unsuccessful",
            Self::Ok(_) => "ok",
        }
    }

    /// Collapse to the public contract: profiles or nothing.
    #[must_use]
    pub fn into_profiles(self) -> Option<Profiles> {
        match self {
            Self::Ok(profiles) => Some(profiles),
            _ => None,
        }
    }
}

// =============================================================================
// FETCHER
// =============================================================================

pub struct ProfileFetcher<T = ReqwestTransport> {
    transport: T,
    host_url: String,
    update_interval: Duration,
}

impl ProfileFetcher<ReqwestTransport> {
    /// Build a fetcher backed by reqwest.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn from_config(config: &RatesConfig) -> Result<Self, FetchError> {
        let transport = ReqwestTransport::new(config)?;
        Ok(Self::with_transport(transport, config))
    }
}

impl<T: HttpTransport> ProfileFetcher<T> {
    pub fn with_transport(transport: T, config: &RatesConfig) -> Self {
        Self {
            transport,
            host_url: config.host_url.trim_end_matches('/').to_string(),
            update_interval: config.profile_update_interval,
        }
    }

    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetch fresh profiles for `uuid`, or `None` if there is nothing usable.
    ///
    /// `last_fetched` is epoch milliseconds of the caller's previous refresh.
    pub async fn fetch_new_profiles(&self, uuid: &str, last_fetched: i64, delay: Duration) -> Option<Profiles> {
        self.fetch_outcome(uuid, last_fetched, delay).await.into_profiles()
    }

    /// Same as [`ProfileFetcher::fetch_new_profiles`] but keeps the reason.
    pub async fn fetch_outcome(&self, uuid: &str, last_fetched: i64, delay: Duration) -> FetchOutcome {
        self.fetch_outcome_at(now_ms(), uuid, last_fetched, delay).await
    }

    async fn fetch_outcome_at(&self, now: i64, uuid: &str, last_fetched: i64, delay: Duration) -> FetchOutcome {
        let outcome = self.run(now, uuid, last_fetched, delay).await;
        match &outcome {
            FetchOutcome::Ok(_) => tracing::debug!(%uuid, "profiles refreshed"),
            other => tracing::debug!(%uuid, reason = other.reason(), "no profile refresh"),
        }
        outcome
    }

    async fn run(&self, now: i64, uuid: &str, last_fetched: i64, delay: Duration) -> FetchOutcome {
        let elapsed_ms = now.saturating_sub(last_fetched);
        if elapsed_ms < interval_ms(self.update_interval) {
            return FetchOutcome::RateLimited { elapsed_ms };
        }

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let url = profiles_endpoint(&self.host_url, uuid);
        let response = match self.transport.get(&url).await {
            Ok(response) => response,
            Err(e) => return FetchOutcome::Network(e),
        };
        if response.status != 200 {
            return FetchOutcome::HttpStatus(response.status);
        }

        parse_profiles(&response.body)
    }
}

fn profiles_endpoint(host_url: &str, uuid: &str) -> String {
    format!("{host_url}/api/profiles/{uuid}")
}

fn parse_profiles(body: &str) -> FetchOutcome {
    match serde_json::from_str::<Profiles>(body) {
        Ok(profiles) if profiles.is_success() => FetchOutcome::Ok(profiles),
        Ok(_) => FetchOutcome::Unsuccessful,
        Err(e) => FetchOutcome::Parse(e.to_string()),
    }
}

fn interval_ms(interval: Duration) -> i64 {
    i64::try_from(interval.as_millis()).unwrap_or(i64::MAX)
}

/// Current time in epoch milliseconds.
#[must_use]
pub fn now_ms() -> i64 {
    let nanos = time::OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
    i64::try_from(nanos).unwrap_or(i64::MAX)
}
