//! Shared helpers for the workspace-level test suite.

use std::sync::Arc;

use waypoint_core::{EngineOptions, FlowCatalog, StateStore, TourEngine};
use waypoint_test_utils::FlowCatalogBuilder;

/// Install a test subscriber so `RUST_LOG` controls test output
///
/// Safe to call from every test; only the first call wins.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Catalog used across the system tests: a 2-step global intro plus a
/// 3-step scenario flow
pub fn standard_catalog() -> FlowCatalog {
    FlowCatalogBuilder::new()
        .with_global_intro("G", 2)
        .with_scenario_flow("sim-1", "S1", 3)
        .build()
}

/// Construct an engine over the given store without auto-start
pub async fn engine_over(store: Arc<dyn StateStore>) -> TourEngine {
    TourEngine::new(standard_catalog(), EngineOptions::default(), store).await
}

/// Construct an engine over the given store with auto-start enabled
pub async fn auto_starting_engine_over(store: Arc<dyn StateStore>) -> TourEngine {
    TourEngine::new(
        standard_catalog(),
        EngineOptions {
            auto_start_global_intro: true,
        },
        store,
    )
    .await
}
