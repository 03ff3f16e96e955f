//! Lateral Motion Planner - Main Entry Point
//!
//! Drives the planner at the vision model's frame cadence. Wiring this
//! binary to a real transport (the vision/radar/vehicle-state feeds and the
//! published plan) is out of scope here; this loop exists to exercise the
//! planner end-to-end at the right tick rate.

use std::time::Duration;

use config_source::{LateralParams, StaticConfigSource};
use lateral_planner::{Planner, PlannerConfig, PlannerInputs};
use planner_types::{CarState, ControlsState, LaneLineFrame, ModelV2Frame, RadarState};
use tracing::info;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    lateral_planner::logging::init();
    info!("=== Lateral Motion Planner v{} ===", env!("CARGO_PKG_VERSION"));

    let mut planner = Planner::new(PlannerConfig::default());
    let config_source = StaticConfigSource::new();
    let defaults = LateralParams::default();

    let mut tick = tokio::time::interval(Duration::from_secs_f64(planner_types::constants::DT));
    loop {
        tick.tick().await;

        planner.maybe_poll_params(&config_source, defaults);

        let inputs = PlannerInputs {
            car_state: CarState {
                v_ego: 20.0,
                valid: true,
                alive: true,
                ..Default::default()
            },
            controls_state: ControlsState {
                active: true,
                ..Default::default()
            },
            model: ModelV2Frame::default(),
            lanes: LaneLineFrame::default(),
            radar: RadarState::default(),
        };

        planner.update(&inputs);
        let plan = planner.publish();
        tracing::debug!(curvature = plan.curvature, desire = ?plan.desire, "lateral plan published");
    }
}
