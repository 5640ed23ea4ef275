//! Persisted UI preferences for the rates calculator.
//!
//! SYSTEM CONTEXT
//! ==============
//! `snapshot` defines the stored shape, `storage` the backends, `writable`
//! the observable holder, and `store` ties them together per render scope.

pub mod snapshot;
pub mod storage;
pub mod store;
pub mod writable;

pub use snapshot::{CURRENT_RATES_VERSION, Crop, ExportedFlags, FarmingTool, RatesData};
#[cfg(feature = "hydrate")]
pub use storage::LocalStorage;
pub use storage::{FileStorage, MemoryStorage, NoopStorage, StorageError, StoragePort};
pub use store::{PreferenceStore, RATES_DATA_KEY, RatesStore};
pub use writable::{SubscriptionId, Writable};
