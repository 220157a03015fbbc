//! Storage Port
//!
//! The journal keeps its whole trade list under a single key of a durable
//! key-value store. This module defines that store abstraction so the
//! journal logic does not depend on where the bytes end up.
//!
//! # Implementations
//!
//! - `JsonFileStore`: one JSON file per key in a data directory
//! - `InMemoryKeyValueStore`: process-local map, used by tests
//!
//! # Example
//!
//! ```rust,no_run
//! use tradejournal::domain::repositories::KeyValueStore;
//! use tradejournal::infrastructure::InMemoryKeyValueStore;
//!
//! let store = InMemoryKeyValueStore::new();
//! store.set("tj_ftmo_v1", "[]").unwrap();
//! assert_eq!(store.get("tj_ftmo_v1").unwrap().as_deref(), Some("[]"));
//! ```

use anyhow::Result;

/// Durable string-keyed storage for serialized payloads
pub trait KeyValueStore: Send + Sync {
    /// Read the payload stored under `key`, `None` if nothing was ever written
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the payload stored under `key`
    fn set(&self, key: &str, value: &str) -> Result<()>;
}
