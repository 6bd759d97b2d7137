//! Storage infrastructure: the persisted configuration store.
//!
//! The `store` sub-module handles:
//!
//! - Reading the prior store's raw values to offer as defaults.
//! - Backing up the prior store before it is replaced.
//! - Replacing the store atomically with a freshly rendered record.

pub mod store;

pub use store::{backup_path, ConfigStore, StoreError, WriteReport, DEFAULT_STORE_FILE};
