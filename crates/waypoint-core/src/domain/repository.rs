//! Persistence interface for the Waypoint engine
//!
//! The engine persists its whole state as one opaque blob under a fixed,
//! well-known key. External crates implement [`StateStore`] to provide the
//! actual storage (browser local storage, a file, a database row).

use async_trait::async_trait;

use crate::EngineError;

/// The fixed key the engine stores its serialized state under
pub const TOUR_STATE_KEY: &str = "waypoint.tour_state";

/// Durable key-value store consumed by the engine
///
/// Implementations must treat both key and value as opaque. A failed
/// write is reported through the `Result`; the engine logs and swallows
/// it, so implementations should not panic on storage trouble.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Read the blob stored under `key`, if any
    async fn get(&self, key: &str) -> Result<Option<String>, EngineError>;

    /// Write `value` under `key`, replacing any previous blob
    async fn set(&self, key: &str, value: String) -> Result<(), EngineError>;
}

/// Memory implementation for testing
#[cfg(feature = "testing")]
pub mod memory {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Arc, RwLock};

    /// In-memory implementation of the state store
    ///
    /// Cloning shares the underlying map, so a clone can stand in for a
    /// "second session" against the same storage in tests.
    #[derive(Clone, Default)]
    pub struct MemoryStateStore {
        entries: Arc<RwLock<HashMap<String, String>>>,
    }

    impl MemoryStateStore {
        /// Create a new empty memory state store
        pub fn new() -> Self {
            Self::default()
        }

        /// Number of keys currently stored
        pub fn len(&self) -> usize {
            self.entries.read().map(|map| map.len()).unwrap_or(0)
        }

        /// Whether the store holds no keys
        pub fn is_empty(&self) -> bool {
            self.len() == 0
        }
    }

    #[async_trait]
    impl StateStore for MemoryStateStore {
        async fn get(&self, key: &str) -> Result<Option<String>, EngineError> {
            let entries = self.entries.read().map_err(|e| {
                EngineError::StateStoreError(format!("Failed to acquire read lock: {}", e))
            })?;

            Ok(entries.get(key).cloned())
        }

        async fn set(&self, key: &str, value: String) -> Result<(), EngineError> {
            let mut entries = self.entries.write().map_err(|e| {
                EngineError::StateStoreError(format!("Failed to acquire write lock: {}", e))
            })?;

            entries.insert(key.to_string(), value);

            Ok(())
        }
    }

}
