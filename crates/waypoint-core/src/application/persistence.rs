//! State loading and the fire-and-forget persistence writer
//!
//! Every mutation of the engine enqueues a full-state snapshot here. A
//! single writer task drains the queue in order, so the store always ends
//! up with the latest state even though callers never await the writes.
//! Persistence is best-effort: failures are logged and swallowed, and the
//! in-memory state stays authoritative for the session.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

use crate::domain::repository::{StateStore, TOUR_STATE_KEY};
use crate::domain::tour_state::TourState;

/// Version of the persisted blob layout
pub const STATE_SCHEMA_VERSION: u32 = 1;

/// The envelope written to the state store
///
/// `saved_at` is informational. `schema_version` guards decoding: a blob
/// written by a newer layout falls back to the default state, the same as
/// a malformed blob.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistedState {
    /// Layout version of this blob
    pub schema_version: u32,

    /// When the blob was written
    pub saved_at: DateTime<Utc>,

    /// The persisted tour state
    pub state: TourState,
}

impl PersistedState {
    /// Wrap a state snapshot in a current-version envelope
    pub fn now(state: TourState) -> Self {
        Self {
            schema_version: STATE_SCHEMA_VERSION,
            saved_at: Utc::now(),
            state,
        }
    }
}

/// Load the persisted tour state, falling back to the default
///
/// Tolerates an absent key, an unreadable store, a malformed blob, and an
/// unknown schema version; every failure path degrades to
/// `TourState::default()` with a warning.
pub async fn load_state(store: &dyn StateStore) -> TourState {
    let blob = match store.get(TOUR_STATE_KEY).await {
        Ok(Some(blob)) => blob,
        Ok(None) => {
            debug!("No persisted tour state found, starting from the default");
            return TourState::default();
        }
        Err(e) => {
            warn!("Failed to read tour state, starting from the default: {}", e);
            return TourState::default();
        }
    };

    match serde_json::from_str::<PersistedState>(&blob) {
        Ok(persisted) if persisted.schema_version <= STATE_SCHEMA_VERSION => persisted.state,
        Ok(persisted) => {
            warn!(
                "Persisted tour state has unknown schema version {}, starting from the default",
                persisted.schema_version
            );
            TourState::default()
        }
        Err(e) => {
            warn!("Persisted tour state is malformed, starting from the default: {}", e);
            TourState::default()
        }
    }
}

enum WriteRequest {
    Save(TourState),
    Flush(oneshot::Sender<()>),
}

/// Handle to the background persistence writer
///
/// Writes are enqueued without blocking and performed in order by one
/// spawned task. Dropping the handle closes the queue; writes still in
/// flight may complete or be dropped, which is harmless because the next
/// session rehydrates from whatever blob last landed.
pub(crate) struct StateWriter {
    tx: mpsc::UnboundedSender<WriteRequest>,
}

impl StateWriter {
    /// Spawn the writer task for the given store
    pub(crate) fn spawn(store: Arc<dyn StateStore>) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            while let Some(request) = rx.recv().await {
                match request {
                    WriteRequest::Save(state) => save_state(store.as_ref(), state).await,
                    WriteRequest::Flush(ack) => {
                        let _ = ack.send(());
                    }
                }
            }
        });

        Self { tx }
    }

    /// Enqueue a snapshot for writing; never blocks, never fails the caller
    pub(crate) fn enqueue(&self, state: TourState) {
        if self.tx.send(WriteRequest::Save(state)).is_err() {
            warn!("State writer task is gone, dropping persistence write");
        }
    }

    /// Wait until every previously enqueued write has been attempted
    pub(crate) async fn flush(&self) {
        let (ack_tx, ack_rx) = oneshot::channel();
        if self.tx.send(WriteRequest::Flush(ack_tx)).is_ok() {
            let _ = ack_rx.await;
        }
    }
}

async fn save_state(store: &dyn StateStore, state: TourState) {
    let envelope = PersistedState::now(state);

    let blob = match serde_json::to_string(&envelope) {
        Ok(blob) => blob,
        Err(e) => {
            warn!("Failed to serialize tour state, write skipped: {}", e);
            return;
        }
    };

    if let Err(e) = store.set(TOUR_STATE_KEY, blob).await {
        warn!("Failed to persist tour state, in-memory state remains authoritative: {}", e);
    }
}
