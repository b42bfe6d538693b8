use super::flow_definition::{FlowId, ScenarioId};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Outcome of a forward step transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// Moved to the next step of the active flow
    Advanced,

    /// The active flow ran out of steps and was recorded as completed
    Completed(FlowId),

    /// There was no active flow to advance
    NoActiveFlow,
}

/// Aggregate: persisted tour progress for one client session
///
/// This is the only mutable entity the engine owns. Every mutation goes
/// through the methods below, which maintain the invariants: the step index
/// is only meaningful while a flow is active and resets to 0 whenever the
/// active flow changes; a dismissed flow can never become active; completed
/// flows are only recorded through forward advancement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TourState {
    /// Global kill switch for all guided tours
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Flows that were finished to completion
    #[serde(default)]
    pub completed_flows: HashSet<FlowId>,

    /// Flows the user opted out of permanently
    #[serde(default)]
    pub dismissed_flows: HashSet<FlowId>,

    /// The currently running flow, if any
    #[serde(default)]
    pub active_flow_id: Option<FlowId>,

    /// Zero-based index into the active flow's steps
    #[serde(default)]
    pub active_step_index: usize,

    /// Per-scenario preference data (opaque; reserved for the UI layer)
    #[serde(default)]
    pub scenario_preferences: HashMap<ScenarioId, serde_json::Value>,

    /// Action identifiers the user has performed (opaque; reserved)
    #[serde(default)]
    pub completed_actions: HashSet<String>,
}

fn default_enabled() -> bool {
    true
}

impl Default for TourState {
    /// The documented default: tours enabled, nothing completed or
    /// dismissed, no active flow
    fn default() -> Self {
        Self {
            enabled: true,
            completed_flows: HashSet::new(),
            dismissed_flows: HashSet::new(),
            active_flow_id: None,
            active_step_index: 0,
            scenario_preferences: HashMap::new(),
            completed_actions: HashSet::new(),
        }
    }
}

impl TourState {
    /// Set the global enabled flag
    ///
    /// Disabling clears any active flow; enabling leaves a previously
    /// active flow untouched so it resumes where it was. Returns whether
    /// the state changed.
    pub fn set_enabled(&mut self, enabled: bool) -> bool {
        let clearing = !enabled && self.active_flow_id.is_some();
        if self.enabled == enabled && !clearing {
            return false;
        }

        self.enabled = enabled;
        if !enabled {
            self.clear_active();
        }
        true
    }

    /// Activate a flow, pre-empting any currently active one
    ///
    /// A flow in the dismissed set is never activated. Returns whether the
    /// state changed.
    pub fn activate(&mut self, flow_id: FlowId) -> bool {
        if self.dismissed_flows.contains(&flow_id) {
            return false;
        }

        if self.active_flow_id.as_ref() == Some(&flow_id) && self.active_step_index == 0 {
            return false;
        }

        self.active_flow_id = Some(flow_id);
        self.active_step_index = 0;
        true
    }

    /// Advance the active flow by one step
    ///
    /// `step_count` is the number of steps in the active flow. When the
    /// index would run past the end, the flow is cleared and recorded as
    /// completed instead; completion is recorded at most once per flow.
    pub fn advance(&mut self, step_count: usize) -> AdvanceOutcome {
        let Some(flow_id) = self.active_flow_id.clone() else {
            return AdvanceOutcome::NoActiveFlow;
        };

        if self.active_step_index + 1 < step_count {
            self.active_step_index += 1;
            return AdvanceOutcome::Advanced;
        }

        self.clear_active();
        self.completed_flows.insert(flow_id.clone());
        AdvanceOutcome::Completed(flow_id)
    }

    /// Move the active flow back one step
    ///
    /// The index never goes below 0. Returns whether the state changed.
    pub fn retreat(&mut self) -> bool {
        if self.active_flow_id.is_none() || self.active_step_index == 0 {
            return false;
        }

        self.active_step_index -= 1;
        true
    }

    /// Dismiss the active flow
    ///
    /// Clears the active flow; with `dont_show_again` the flow is also
    /// added to the dismissed set so it can never be activated again.
    /// Dismissal never counts as completion. Returns the dismissed flow
    /// ID, or `None` if no flow was active.
    pub fn dismiss_active(&mut self, dont_show_again: bool) -> Option<FlowId> {
        let flow_id = self.active_flow_id.clone()?;

        self.clear_active();
        if dont_show_again {
            self.dismissed_flows.insert(flow_id.clone());
        }
        Some(flow_id)
    }

    /// Replace the whole state with the documented default
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Store opaque preference data for a scenario
    ///
    /// The engine never interprets the value. Returns whether the state
    /// changed.
    pub fn set_scenario_preference(
        &mut self,
        scenario: ScenarioId,
        value: serde_json::Value,
    ) -> bool {
        if self.scenario_preferences.get(&scenario) == Some(&value) {
            return false;
        }

        self.scenario_preferences.insert(scenario, value);
        true
    }

    /// Record an opaque action identifier as performed
    ///
    /// Returns whether the state changed (false if already recorded).
    pub fn complete_action(&mut self, action: String) -> bool {
        self.completed_actions.insert(action)
    }

    fn clear_active(&mut self) {
        self.active_flow_id = None;
        self.active_step_index = 0;
    }
}
