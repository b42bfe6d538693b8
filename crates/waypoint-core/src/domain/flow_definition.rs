use crate::types::StepContent;
use crate::EngineError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Value object: Flow ID
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FlowId(pub String);

/// Value object: Scenario ID
///
/// Identifies the external training scenario a flow belongs to. The engine
/// does not interpret it beyond using it as a catalog key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScenarioId(pub String);

/// One instructional step within a guided tour
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowStep {
    /// ID of the step, unique within its flow
    pub id: String,

    /// Display content for the step overlay (opaque to the engine)
    pub content: StepContent,

    /// Optional reference to the UI element the step points at
    /// (opaque to the engine)
    pub target: Option<String>,
}

/// A named, ordered guided-tour definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flow {
    /// ID of the flow
    pub id: FlowId,

    /// Human-readable name of the flow
    pub name: String,

    /// Description of the flow
    pub description: Option<String>,

    /// The ordered steps in this flow
    pub steps: Vec<FlowStep>,
}

/// The static set of guided tours available to an engine instance
///
/// Supplied wholesale at construction and read-only afterwards. Flow IDs
/// must be unique across the whole catalog; this is a configuration
/// contract of the caller, and [`FlowCatalog::find_flow`] is undefined
/// under duplicates. Callers that want the check enforced can run
/// [`FlowCatalog::validate`] once at startup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlowCatalog {
    /// The distinguished flow eligible for automatic start, if any
    pub global_intro: Option<Flow>,

    /// Scenario-specific flows, started on demand
    pub scenarios: HashMap<ScenarioId, Flow>,
}

impl FlowCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the global intro flow, if one is configured
    pub fn global_intro(&self) -> Option<&Flow> {
        self.global_intro.as_ref()
    }

    /// Get the ID of the global intro flow, if one is configured
    pub fn global_intro_id(&self) -> Option<&FlowId> {
        self.global_intro.as_ref().map(|flow| &flow.id)
    }

    /// Look up a flow by ID anywhere in the catalog
    ///
    /// Checks the global intro first, then the scenario flows.
    pub fn find_flow(&self, id: &FlowId) -> Option<&Flow> {
        if let Some(intro) = &self.global_intro {
            if &intro.id == id {
                return Some(intro);
            }
        }

        self.scenarios.values().find(|flow| &flow.id == id)
    }

    /// Get the flow for a scenario, if one is configured
    pub fn scenario_flow(&self, scenario: &ScenarioId) -> Option<&Flow> {
        self.scenarios.get(scenario)
    }

    /// Validate the catalog configuration
    ///
    /// Reports duplicate flow IDs and flows without steps. The engine does
    /// not run this itself; lookups on an invalid catalog are undefined.
    pub fn validate(&self) -> Result<(), EngineError> {
        let mut flow_ids = std::collections::HashSet::new();

        for flow in self.flows() {
            if !flow_ids.insert(&flow.id) {
                return Err(EngineError::ConfigurationError(format!(
                    "Duplicate flow ID: {}",
                    flow.id.0
                )));
            }

            if flow.steps.is_empty() {
                return Err(EngineError::ValidationError(format!(
                    "Flow has no steps: {}",
                    flow.id.0
                )));
            }

            // Step IDs must be unique within their flow
            let mut step_ids = std::collections::HashSet::new();
            for step in &flow.steps {
                if !step_ids.insert(&step.id) {
                    return Err(EngineError::ValidationError(format!(
                        "Duplicate step ID in flow {}: {}",
                        flow.id.0, step.id
                    )));
                }
            }
        }

        Ok(())
    }

    /// Iterate over every flow in the catalog
    pub fn flows(&self) -> impl Iterator<Item = &Flow> {
        self.global_intro.iter().chain(self.scenarios.values())
    }
}
