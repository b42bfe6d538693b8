//! Mock and fake implementations of the StateStore trait.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use tracing::debug;
use waypoint_core::{EngineError, StateStore};

mockall::mock! {
    /// Mockall-generated state store for expectation-based tests
    pub StateStore {}

    #[async_trait]
    impl StateStore for StateStore {
        async fn get(&self, key: &str) -> Result<Option<String>, EngineError>;
        async fn set(&self, key: &str, value: String) -> Result<(), EngineError>;
    }
}

/// State store whose writes always fail
///
/// Reads succeed (absent key), so an engine starts normally and then has
/// every persistence attempt rejected. Useful for verifying the
/// "failures are swallowed" contract.
#[derive(Default)]
pub struct FailingStateStore {
    rejected_writes: AtomicUsize,
}

impl FailingStateStore {
    /// Create a new failing state store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of writes rejected so far
    pub fn rejected_writes(&self) -> usize {
        self.rejected_writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StateStore for FailingStateStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, EngineError> {
        Ok(None)
    }

    async fn set(&self, key: &str, _value: String) -> Result<(), EngineError> {
        self.rejected_writes.fetch_add(1, Ordering::SeqCst);
        debug!("Rejecting write for key: {}", key);
        Err(EngineError::StateStoreError(
            "write rejected by test store".to_string(),
        ))
    }
}

/// State store that records every write it accepts
///
/// Behaves like a working store and additionally counts writes, so tests
/// can assert that every mutation attempted exactly one persistence
/// write and no-ops attempted none.
#[derive(Default)]
pub struct RecordingStateStore {
    entries: Mutex<HashMap<String, String>>,
    writes: AtomicUsize,
}

impl RecordingStateStore {
    /// Create a new recording state store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of writes accepted so far
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// The blob currently stored under `key`, if any
    pub fn stored(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }
}

#[async_trait]
impl StateStore for RecordingStateStore {
    async fn get(&self, key: &str) -> Result<Option<String>, EngineError> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<(), EngineError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.entries.lock().unwrap().insert(key.to_string(), value);
        Ok(())
    }
}
