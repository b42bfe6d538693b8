//! The tour engine - decides which guided tour is visible and drives
//! user-initiated transitions
//!
//! The engine is an explicit handle, not a singleton: construct one per
//! client session (or per test) and pass it to whatever UI layer renders
//! the tour overlays. Queries are synchronous pure reads; mutations update
//! the in-memory state immediately and enqueue a fire-and-forget
//! persistence write.

use std::sync::Arc;

use tracing::{debug, info};

use crate::application::persistence::{load_state, StateWriter};
use crate::domain::flow_definition::{Flow, FlowCatalog, FlowId, FlowStep, ScenarioId};
use crate::domain::repository::StateStore;
use crate::domain::tour_state::{AdvanceOutcome, TourState};

/// Construction options for the tour engine
#[derive(Debug, Clone, Default)]
pub struct EngineOptions {
    /// Start the global intro flow automatically when the auto-start gate
    /// passes (see [`TourEngine::evaluate_auto_start`])
    pub auto_start_global_intro: bool,
}

/// The guided-tour flow engine
///
/// Owns the tour state and the flow catalog for one client session. All
/// operations are infallible: invalid preconditions are defined no-ops,
/// and persistence trouble never surfaces to the caller.
pub struct TourEngine {
    catalog: FlowCatalog,
    options: EngineOptions,
    state: TourState,
    writer: StateWriter,
}

impl TourEngine {
    /// Create an engine, loading persisted state from the store
    ///
    /// Falls back to the default state when the store has no blob or an
    /// unreadable one. When `auto_start_global_intro` is set, the
    /// auto-start gate is evaluated once before returning.
    pub async fn new(
        catalog: FlowCatalog,
        options: EngineOptions,
        store: Arc<dyn StateStore>,
    ) -> Self {
        let state = load_state(store.as_ref()).await;
        let writer = StateWriter::spawn(store);

        let mut engine = Self {
            catalog,
            options,
            state,
            writer,
        };

        if engine.options.auto_start_global_intro {
            engine.evaluate_auto_start();
        }

        engine
    }

    /// The current tour state
    pub fn state(&self) -> &TourState {
        &self.state
    }

    /// The flow catalog this engine was constructed with
    pub fn catalog(&self) -> &FlowCatalog {
        &self.catalog
    }

    /// The currently active flow, if it is set and resolvable
    pub fn active_flow(&self) -> Option<&Flow> {
        self.state
            .active_flow_id
            .as_ref()
            .and_then(|id| self.catalog.find_flow(id))
    }

    /// The step the active flow is currently on, if any
    pub fn active_step(&self) -> Option<&FlowStep> {
        self.active_flow()
            .and_then(|flow| flow.steps.get(self.state.active_step_index))
    }

    /// Whether a tour overlay should be visible right now
    pub fn is_active(&self) -> bool {
        self.state.enabled && self.active_step().is_some()
    }

    /// Set the global enabled flag
    ///
    /// Disabling clears the active flow; completion and dismissal history
    /// are untouched.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.state.set_enabled(enabled) {
            info!("Guided tours {}", if enabled { "enabled" } else { "disabled" });
            self.persist();
        }
    }

    /// Start a flow, pre-empting any currently active one
    ///
    /// No-op when the flow is permanently dismissed or not present in the
    /// catalog. A completed flow starts again from its first step.
    pub fn start_flow(&mut self, flow_id: &FlowId) {
        if self.catalog.find_flow(flow_id).is_none() {
            debug!("Flow not found in catalog, ignoring start: {}", flow_id.0);
            return;
        }

        if self.state.activate(flow_id.clone()) {
            info!("Starting flow: {}", flow_id.0);
            self.persist();
        } else {
            debug!("Flow not started (dismissed or already at first step): {}", flow_id.0);
        }
    }

    /// Advance the active flow by one step, completing it at the end
    ///
    /// No-op when no flow is active or the active flow is missing from
    /// the catalog.
    pub fn next_step(&mut self) {
        let step_count = match self.active_flow() {
            Some(flow) => flow.steps.len(),
            None => {
                debug!("No resolvable active flow, ignoring next_step");
                return;
            }
        };

        match self.state.advance(step_count) {
            AdvanceOutcome::Advanced => {
                debug!("Advanced to step {}", self.state.active_step_index);
                self.persist();
            }
            AdvanceOutcome::Completed(flow_id) => {
                info!("Flow completed: {}", flow_id.0);
                self.persist();
            }
            AdvanceOutcome::NoActiveFlow => {}
        }
    }

    /// Move the active flow back one step; never goes below the first
    pub fn prev_step(&mut self) {
        if self.state.retreat() {
            debug!("Moved back to step {}", self.state.active_step_index);
            self.persist();
        }
    }

    /// Dismiss the active flow
    ///
    /// With `dont_show_again` the flow is permanently blocked from
    /// starting again. Dismissal never counts as completion.
    pub fn dismiss_flow(&mut self, dont_show_again: bool) {
        if let Some(flow_id) = self.state.dismiss_active(dont_show_again) {
            info!(
                "Flow dismissed{}: {}",
                if dont_show_again { " permanently" } else { "" },
                flow_id.0
            );
            self.persist();
        }
    }

    /// Replace the whole tour state with the documented default
    pub fn reset_progress(&mut self) {
        if self.state == TourState::default() {
            return;
        }

        self.state.reset();
        info!("Tour progress reset");
        self.persist();
    }

    /// Store opaque preference data for a scenario (not interpreted)
    pub fn set_scenario_preference(&mut self, scenario: ScenarioId, value: serde_json::Value) {
        if self.state.set_scenario_preference(scenario, value) {
            self.persist();
        }
    }

    /// Read back opaque preference data for a scenario
    pub fn scenario_preference(&self, scenario: &ScenarioId) -> Option<&serde_json::Value> {
        self.state.scenario_preferences.get(scenario)
    }

    /// Record an opaque action identifier as performed (not interpreted)
    pub fn mark_action_completed(&mut self, action: impl Into<String>) {
        if self.state.complete_action(action.into()) {
            self.persist();
        }
    }

    /// Whether an action identifier has been recorded
    pub fn is_action_completed(&self, action: &str) -> bool {
        self.state.completed_actions.contains(action)
    }

    /// The pure auto-start gate
    ///
    /// True iff the catalog has a global intro, tours are enabled, no
    /// flow is active, and the intro is neither completed nor dismissed.
    pub fn auto_start_pending(&self) -> bool {
        let Some(intro_id) = self.catalog.global_intro_id() else {
            return false;
        };

        self.state.enabled
            && self.state.active_flow_id.is_none()
            && !self.state.completed_flows.contains(intro_id)
            && !self.state.dismissed_flows.contains(intro_id)
    }

    /// Evaluate the auto-start gate and start the global intro if it passes
    ///
    /// Only acts when the engine was constructed with
    /// `auto_start_global_intro`. Evaluated once at construction; hosts
    /// re-invoke it after state changes that could open the gate.
    /// Re-evaluating with unchanged failing inputs never starts anything,
    /// so calling it repeatedly is harmless.
    pub fn evaluate_auto_start(&mut self) -> bool {
        if !self.options.auto_start_global_intro || !self.auto_start_pending() {
            return false;
        }

        let Some(intro_id) = self.catalog.global_intro_id().cloned() else {
            return false;
        };

        info!("Auto-starting global intro flow: {}", intro_id.0);
        self.start_flow(&intro_id);
        true
    }

    /// Wait until every persistence write enqueued so far has been
    /// attempted
    ///
    /// Never required for correctness of in-memory decisions; useful at
    /// teardown and in tests.
    pub async fn flush(&self) {
        self.writer.flush().await;
    }

    fn persist(&self) {
        self.writer.enqueue(self.state.clone());
    }
}
