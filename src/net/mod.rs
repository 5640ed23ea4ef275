//! Networking for the profile API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` owns the refresh helper and its HTTP seam; `types` defines the
//! payload and error types it shares with callers.

pub mod api;
pub mod types;

pub use api::{DEFAULT_FETCH_DELAY, FetchOutcome, HttpTransport, ProfileFetcher, ReqwestTransport, now_ms};
pub use types::{FetchError, HttpResponse, Profiles};
