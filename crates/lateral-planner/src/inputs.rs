//! Per-frame inputs to [`crate::planner::Planner::update`].

use planner_types::{CarState, ControlsState, LaneLineFrame, ModelV2Frame, RadarState};

#[derive(Debug, Clone)]
pub struct PlannerInputs {
    pub car_state: CarState,
    pub controls_state: ControlsState,
    pub model: ModelV2Frame,
    pub lanes: LaneLineFrame,
    pub radar: RadarState,
}
