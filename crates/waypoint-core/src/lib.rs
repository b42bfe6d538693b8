//!
//! Waypoint Core - Guided-tour flow engine
//!
//! This crate defines the tour engine, its domain model, and the
//! persistence interface. It decides whether and which guided tour is
//! visible at any moment and drives user-initiated transitions; the UI
//! layer renders whatever [`TourEngine::active_step`] says and calls the
//! mutating operations in response to user input.
//!
//! All engine operations are infallible: invalid preconditions are
//! defined no-ops, and persistence trouble degrades to "tours not
//! persisted" rather than failing the surrounding application.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Domain layer - flow catalog, tour state, persistence interfaces
pub mod domain;

/// Application services - the engine and persistence plumbing
pub mod application;

/// Core types
pub mod types;

/// Error types
pub mod error;

// Re-export key types
pub use error::EngineError;
pub use types::StepContent;

// Re-export main API types for easy use
pub use application::engine::{EngineOptions, TourEngine};
pub use application::persistence::{load_state, PersistedState, STATE_SCHEMA_VERSION};
pub use domain::flow_definition::{Flow, FlowCatalog, FlowId, FlowStep, ScenarioId};
pub use domain::repository::{StateStore, TOUR_STATE_KEY};
pub use domain::tour_state::{AdvanceOutcome, TourState};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repository::memory::MemoryStateStore;
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_public_api_smoke() {
        let mut catalog = FlowCatalog::new();
        catalog.global_intro = Some(Flow {
            id: FlowId("intro".to_string()),
            name: "Welcome".to_string(),
            description: Some("First-run walkthrough".to_string()),
            steps: vec![FlowStep {
                id: "welcome".to_string(),
                content: StepContent::new(json!({"title": "Welcome aboard"})),
                target: Some("#mission-console".to_string()),
            }],
        });
        assert!(catalog.validate().is_ok());

        let mut engine = TourEngine::new(
            catalog,
            EngineOptions {
                auto_start_global_intro: true,
            },
            Arc::new(MemoryStateStore::new()),
        )
        .await;

        assert!(engine.is_active());
        assert_eq!(engine.active_step().unwrap().id, "welcome");

        engine.next_step();
        assert!(!engine.is_active());
        assert!(engine
            .state()
            .completed_flows
            .contains(&FlowId("intro".to_string())));
    }
}
