//! End-to-end walkthrough of the tour engine.
//!
//! Builds a small catalog, runs the global intro to completion, starts
//! and dismisses a scenario tour, and shows what the store ends up
//! holding. Run with `RUST_LOG=debug` to watch the engine's decisions.

use std::sync::Arc;

use serde_json::json;
use tracing::info;
use waypoint::{
    EngineOptions, Flow, FlowCatalog, FlowId, FlowStep, InMemoryStateStore, ScenarioId,
    StepContent, TourEngine, TOUR_STATE_KEY,
};

fn step(id: &str, title: &str, target: &str) -> FlowStep {
    FlowStep {
        id: id.to_string(),
        content: StepContent::new(json!({ "title": title })),
        target: Some(target.to_string()),
    }
}

fn build_catalog() -> FlowCatalog {
    let mut catalog = FlowCatalog::new();

    catalog.global_intro = Some(Flow {
        id: FlowId("intro".to_string()),
        name: "Mission console intro".to_string(),
        description: Some("First-run walkthrough of the console".to_string()),
        steps: vec![
            step("welcome", "Welcome to the mission console", "#console"),
            step("telemetry", "Live telemetry appears here", "#telemetry-panel"),
        ],
    });

    catalog.scenarios.insert(
        ScenarioId("orbit-insertion".to_string()),
        Flow {
            id: FlowId("orbit-tour".to_string()),
            name: "Orbit insertion scenario".to_string(),
            description: None,
            steps: vec![
                step("burn-plan", "Review the burn plan", "#burn-plan"),
                step("execute", "Execute the insertion burn", "#execute-burn"),
                step("confirm", "Confirm the resulting orbit", "#orbit-display"),
            ],
        },
    );

    catalog
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let catalog = build_catalog();
    catalog.validate()?;

    let store = InMemoryStateStore::new();
    let mut engine = TourEngine::new(
        catalog,
        EngineOptions {
            auto_start_global_intro: true,
        },
        Arc::new(store.clone()),
    )
    .await;

    // The intro auto-started; walk through it like a first-time operator
    while engine.is_active() {
        let flow = engine.active_flow().expect("flow is active");
        let step = engine.active_step().expect("step is active");
        info!(
            "Showing step {}/{} of '{}': {}",
            engine.state().active_step_index + 1,
            flow.steps.len(),
            flow.name,
            step.content.as_value()["title"]
        );
        engine.next_step();
    }
    info!("Intro finished: {:?}", engine.state().completed_flows);

    // Open a scenario, look at one step, then opt out permanently
    engine.start_flow(&FlowId("orbit-tour".to_string()));
    if let Some(step) = engine.active_step() {
        info!("Scenario tour starts at: {}", step.content.as_value()["title"]);
    }
    engine.dismiss_flow(true);

    // Trying again stays a no-op
    engine.start_flow(&FlowId("orbit-tour".to_string()));
    info!(
        "After permanent dismissal the tour stays off (active: {:?})",
        engine.state().active_flow_id
    );

    // Show what actually landed in the store
    engine.flush().await;
    let snapshot = store.snapshot().await;
    info!(
        "Store now holds {} byte(s) under '{}'",
        snapshot.get(TOUR_STATE_KEY).map(String::len).unwrap_or(0),
        TOUR_STATE_KEY
    );

    Ok(())
}
