//! System tests driving the engine through whole user journeys.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use waypoint_core::{FlowId, TourState};
use waypoint_state_inmemory::InMemoryStateStore;
use waypoint_tests::{auto_starting_engine_over, engine_over};

fn id(s: &str) -> FlowId {
    FlowId(s.to_string())
}

#[tokio::test]
async fn test_operator_first_session() {
    waypoint_tests::init_test_tracing();
    let store = Arc::new(InMemoryStateStore::new());
    let mut engine = auto_starting_engine_over(store).await;

    // Intro comes up on its own
    assert_eq!(engine.state().active_flow_id, Some(id("G")));
    assert!(engine.is_active());

    // The operator steps through it, peeking back once
    engine.next_step();
    engine.prev_step();
    engine.next_step();
    engine.next_step();
    assert_eq!(engine.state().active_flow_id, None);
    assert_eq!(engine.state().completed_flows.len(), 1);

    // They open the first simulator scenario and opt out of its tour
    engine.start_flow(&id("S1"));
    assert!(engine.is_active());
    engine.dismiss_flow(true);

    // The tour stays gone, however it is requested; the intro does not
    // come back either, because it is already completed
    engine.start_flow(&id("S1"));
    assert_eq!(engine.state().active_flow_id, None);
    assert!(!engine.evaluate_auto_start());
    assert_eq!(engine.state().active_flow_id, None);
}

#[tokio::test]
async fn test_kill_switch_mid_tour() {
    let store = Arc::new(InMemoryStateStore::new());
    let mut engine = engine_over(store).await;

    engine.start_flow(&id("S1"));
    engine.next_step();
    assert_eq!(engine.state().active_step_index, 1);

    engine.set_enabled(false);
    assert!(!engine.is_active());
    assert_eq!(engine.state().active_flow_id, None);

    // Turning tours back on does not resurrect the cleared flow, and
    // mid-tour progress is gone; the flow restarts from the top
    engine.set_enabled(true);
    assert_eq!(engine.state().active_flow_id, None);

    engine.start_flow(&id("S1"));
    assert_eq!(engine.state().active_step_index, 0);
}

#[tokio::test]
async fn test_reset_after_arbitrary_history() {
    let store = Arc::new(InMemoryStateStore::new());
    let mut engine = auto_starting_engine_over(store).await;

    engine.next_step();
    engine.next_step();
    engine.start_flow(&id("S1"));
    engine.dismiss_flow(true);
    engine.set_enabled(false);
    engine.mark_action_completed("ran-prelaunch-checklist");

    engine.reset_progress();
    assert_eq!(engine.state(), &TourState::default());

    // After a reset the intro is auto-startable again
    assert!(engine.auto_start_pending());
    assert!(engine.evaluate_auto_start());
    assert_eq!(engine.state().active_flow_id, Some(id("G")));
}

#[tokio::test]
async fn test_two_engines_last_write_wins() {
    let store = InMemoryStateStore::new();

    // Two "tabs" over the same storage area
    let mut tab_a = engine_over(Arc::new(store.clone())).await;
    let mut tab_b = engine_over(Arc::new(store.clone())).await;

    tab_a.start_flow(&id("G"));
    tab_a.flush().await;

    tab_b.start_flow(&id("S1"));
    tab_b.next_step();
    tab_b.flush().await;

    // The store holds whichever state was written last; a third session
    // sees tab B's world
    let tab_c = engine_over(Arc::new(store)).await;
    assert_eq!(tab_c.state().active_flow_id, Some(id("S1")));
    assert_eq!(tab_c.state().active_step_index, 1);
}
