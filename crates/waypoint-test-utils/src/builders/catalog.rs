//! Builder for flow catalogs used in tests.

use waypoint_core::{Flow, FlowCatalog, ScenarioId};

use crate::data_generators::simple_flow;

/// Fluent builder for a [`FlowCatalog`]
///
/// ```
/// use waypoint_test_utils::FlowCatalogBuilder;
///
/// let catalog = FlowCatalogBuilder::new()
///     .with_global_intro("intro", 2)
///     .with_scenario_flow("sim-1", "docking-tour", 3)
///     .build();
///
/// assert!(catalog.global_intro().is_some());
/// assert_eq!(catalog.scenarios.len(), 1);
/// ```
#[derive(Default)]
pub struct FlowCatalogBuilder {
    catalog: FlowCatalog,
}

impl FlowCatalogBuilder {
    /// Start with an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a global intro flow with `step_count` generated steps
    pub fn with_global_intro(mut self, flow_id: &str, step_count: usize) -> Self {
        self.catalog.global_intro = Some(simple_flow(flow_id, step_count));
        self
    }

    /// Add a scenario flow with `step_count` generated steps
    pub fn with_scenario_flow(mut self, scenario: &str, flow_id: &str, step_count: usize) -> Self {
        self.catalog.scenarios.insert(
            ScenarioId(scenario.to_string()),
            simple_flow(flow_id, step_count),
        );
        self
    }

    /// Add a pre-built flow for a scenario
    pub fn with_flow(mut self, scenario: &str, flow: Flow) -> Self {
        self.catalog
            .scenarios
            .insert(ScenarioId(scenario.to_string()), flow);
        self
    }

    /// Finish and return the catalog
    pub fn build(self) -> FlowCatalog {
        self.catalog
    }
}
