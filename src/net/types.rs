//! Wire types and errors for the profile API.

use serde::{Deserialize, Serialize};

/// Errors raised by the HTTP layer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    /// The request did not complete (DNS, connect, timeout, body read).
    #[error("request failed: {0}")]
    Request(String),
}

/// Status and raw body of one HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Profile payload returned by `/api/profiles/{uuid}`.
///
/// Kept as raw JSON; the only field this crate inspects is `success`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Profiles(pub serde_json::Value);

impl Profiles {
    /// True when the payload is an object whose `success` field is truthy.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.0.get("success").is_some_and(is_truthy)
    }

    #[must_use]
    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }

    #[must_use]
    pub fn into_value(self) -> serde_json::Value {
        self.0
    }
}

/// Truthiness as the profile API's browser clients evaluate it.
#[must_use]
pub fn is_truthy(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => false,
        serde_json::Value::Bool(b) => *b,
        serde_json::Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        serde_json::Value::String(s) => !s.is_empty(),
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => true,
    }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;
