//! Testing utilities for the Waypoint platform.
//!
//! This crate provides standardized testing utilities for the Waypoint
//! platform: catalog and flow builders, state-store fakes and mocks, and
//! test data generators.

pub mod builders;
pub mod data_generators;
pub mod mocks;

/// Re-export commonly used types for convenience
pub use mockall;

pub use builders::FlowCatalogBuilder;
pub use mocks::state_store::{FailingStateStore, MockStateStore, RecordingStateStore};
