//!
//! Waypoint - Guided-tour flow engine for operator onboarding
//!
//! This facade crate re-exports the pieces most hosts need: the engine
//! and domain types from `waypoint-core` and the in-memory store from
//! `waypoint-state-inmemory`. Applications with their own durable
//! storage implement [`StateStore`] instead of using the in-memory one.

#![forbid(unsafe_code)]

pub use waypoint_core::{
    load_state, AdvanceOutcome, EngineError, EngineOptions, Flow, FlowCatalog, FlowId, FlowStep,
    PersistedState, ScenarioId, StateStore, StepContent, TourEngine, TourState,
    STATE_SCHEMA_VERSION, TOUR_STATE_KEY,
};

pub use waypoint_state_inmemory::InMemoryStateStore;
