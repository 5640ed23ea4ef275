//! Client-side support for the farming rates calculator.
//!
//! - [`prefs`]: versioned UI preferences persisted through a [`prefs::StoragePort`]
//!   and handed to views through a scoped [`context::Context`].
//! - [`net`]: rate-limited profile refresh against `/api/profiles/{uuid}`.

pub mod config;
pub mod context;
pub mod net;
pub mod prefs;

pub use config::{ConfigError, RatesConfig};
pub use context::Context;
