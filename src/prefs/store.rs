//! Rates-data preference store: load, persist, and scope the snapshot.
//!
//! SYSTEM CONTEXT
//! ==============
//! `PreferenceStore::initialize` runs once per render root. It seeds a
//! [`Writable`] from storage, attaches a writer that persists every change,
//! and publishes the holder into the [`Context`] under [`RATES_DATA_KEY`].
//! Views call `get` to reach the same holder.
//!
//! ERROR HANDLING
//! ==============
//! Storage problems never reach callers. Unreadable or corrupt snapshots
//! fall back to the initial value with a warning; failed writes are logged
//! and dropped.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::rc::Rc;

use super::snapshot::{self, Decoded, RatesData};
use super::storage::StoragePort;
use super::writable::Writable;
use crate::context::Context;

/// Storage key and context key for the snapshot.
pub const RATES_DATA_KEY: &str = "ratesData";

pub type RatesStore = Writable<RatesData>;

/// What storage held under [`RATES_DATA_KEY`].
enum Stored {
    Snapshot(RatesData),
    /// Another version's snapshot that no longer fits the current shape.
    Stale,
    /// Nothing usable: absent, unreadable, or corrupt.
    Missing,
}

#[derive(Clone)]
pub struct PreferenceStore {
    storage: Rc<dyn StoragePort>,
}

impl std::fmt::Debug for PreferenceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreferenceStore").finish_non_exhaustive()
    }
}

impl PreferenceStore {
    pub fn new(storage: impl StoragePort + 'static) -> Self {
        Self { storage: Rc::new(storage) }
    }

    pub fn from_shared(storage: Rc<dyn StoragePort>) -> Self {
        Self { storage }
    }

    /// Read the persisted snapshot, if a usable one exists.
    ///
    /// The version is not checked; a stale snapshot that still parses is
    /// returned as-is and reset by [`PreferenceStore::get`].
    #[must_use]
    pub fn load(&self) -> Option<RatesData> {
        match self.read() {
            Stored::Snapshot(data) => Some(data),
            Stored::Stale | Stored::Missing => None,
        }
    }

    fn read(&self) -> Stored {
        let raw = match self.storage.get_item(RATES_DATA_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Stored::Missing,
            Err(e) => {
                tracing::warn!(error = %e, key = RATES_DATA_KEY, "preference storage read failed");
                return Stored::Missing;
            }
        };

        match snapshot::decode(&raw) {
            Decoded::Snapshot(data) => Stored::Snapshot(data),
            Decoded::Stale { version } => {
                tracing::debug!(?version, "discarding stale rates snapshot");
                Stored::Stale
            }
            Decoded::Corrupt(e) => {
                tracing::warn!(error = %e, key = RATES_DATA_KEY, "stored rates snapshot is corrupt, using defaults");
                Stored::Missing
            }
        }
    }

    /// [`PreferenceStore::initialize_with`] using default settings.
    pub fn initialize(&self, cx: &Context) -> RatesStore {
        self.initialize_with(cx, RatesData::default())
    }

    /// Create the holder for this scope, seeded from storage or `initial`.
    ///
    /// A stored snapshot from another version seeds defaults, not `initial`.
    /// The starting value is written back immediately, then after every
    /// change.
    pub fn initialize_with(&self, cx: &Context, initial: RatesData) -> RatesStore {
        let data = match self.read() {
            Stored::Snapshot(data) => data,
            Stored::Stale => RatesData::default(),
            Stored::Missing => initial,
        };
        let store = Writable::new(data);

        let storage = Rc::clone(&self.storage);
        store.subscribe(move |rates| persist(storage.as_ref(), rates));

        cx.provide(RATES_DATA_KEY, store.clone());
        store
    }

    /// Holder for this scope, initializing one if none was published.
    ///
    /// Every call normalizes the held snapshot: a version other than
    /// [`snapshot::CURRENT_RATES_VERSION`] is replaced by defaults, dropping
    /// settings saved by older builds.
    pub fn get(&self, cx: &Context) -> RatesStore {
        let store = match cx.get::<RatesStore>(RATES_DATA_KEY) {
            Some(store) => store,
            None => {
                tracing::debug!("rates data not in context, initializing");
                self.initialize(cx)
            }
        };
        store.update(RatesData::normalized);
        store
    }

    /// Put this scope's snapshot back to defaults.
    pub fn reset(&self, cx: &Context) -> RatesStore {
        let store = self.get(cx);
        store.set(RatesData::default());
        store
    }
}

fn persist(storage: &dyn StoragePort, rates: &RatesData) {
    let raw = match serde_json::to_string(rates) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::warn!(error = %e, "rates snapshot encode failed");
            return;
        }
    };
    if let Err(e) = storage.set_item(RATES_DATA_KEY, &raw) {
        tracing::warn!(error = %e, key = RATES_DATA_KEY, "preference storage write failed");
    }
}
