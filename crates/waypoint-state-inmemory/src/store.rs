//! Shared-map implementation of the state store

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use waypoint_core::{EngineError, StateStore};

/// In-memory implementation of the state store
///
/// Keys and values are held in a shared map behind an async lock. Clones
/// share the same storage, so one store can back several engine instances
/// the way a real browser storage area backs several tabs (last write
/// wins, no merge).
#[derive(Clone, Default)]
pub struct InMemoryStateStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryStateStore {
    /// Create a new empty in-memory state store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with the given entries
    pub fn with_entries(entries: HashMap<String, String>) -> Self {
        Self {
            entries: Arc::new(RwLock::new(entries)),
        }
    }

    /// Snapshot of everything currently stored
    ///
    /// Intended for test assertions and debugging.
    pub async fn snapshot(&self) -> HashMap<String, String> {
        self.entries.read().await.clone()
    }

    /// Remove every stored entry
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }
}

#[async_trait]
impl StateStore for InMemoryStateStore {
    async fn get(&self, key: &str) -> Result<Option<String>, EngineError> {
        let entries = self.entries.read().await;
        let found = entries.get(key).cloned();
        debug!(
            "Get key: {} ({})",
            key,
            if found.is_some() { "hit" } else { "miss" }
        );
        Ok(found)
    }

    async fn set(&self, key: &str, value: String) -> Result<(), EngineError> {
        debug!("Set key: {} ({} bytes)", key, value.len());
        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), value);
        Ok(())
    }
}
