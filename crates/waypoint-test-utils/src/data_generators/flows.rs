//! Generators for flows and steps.

use serde_json::json;
use uuid::Uuid;
use waypoint_core::{Flow, FlowId, FlowStep, StepContent};

/// Generate a step with placeholder content
pub fn simple_step(id: &str) -> FlowStep {
    FlowStep {
        id: id.to_string(),
        content: StepContent::new(json!({
            "title": format!("Step {}", id),
            "body": "Placeholder instruction text",
        })),
        target: Some(format!("#{}", id)),
    }
}

/// Generate a flow with `step_count` placeholder steps
pub fn simple_flow(flow_id: &str, step_count: usize) -> Flow {
    Flow {
        id: FlowId(flow_id.to_string()),
        name: format!("Flow {}", flow_id),
        description: None,
        steps: (0..step_count)
            .map(|i| simple_step(&format!("{}-step-{}", flow_id, i)))
            .collect(),
    }
}

/// Generate a flow ID that won't collide with anything else in the test
pub fn unique_flow_id() -> FlowId {
    FlowId(format!("flow-{}", Uuid::new_v4()))
}
