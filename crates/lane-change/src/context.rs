//! Lane-change context — the state this component owns across frames.

use planner_types::{LaneChangeDirection, LaneChangeState};

#[derive(Debug, Clone, Copy)]
pub struct LaneChangeContext {
    pub state: LaneChangeState,
    pub direction: LaneChangeDirection,
    pub timer_s: f64,
    pub ll_prob: f64,
    pub wait_timer_s: f64,
    pub prev_one_blinker: bool,
}

impl Default for LaneChangeContext {
    fn default() -> Self {
        Self {
            state: LaneChangeState::Off,
            direction: LaneChangeDirection::None,
            timer_s: 0.0,
            ll_prob: 1.0,
            wait_timer_s: 0.0,
            prev_one_blinker: false,
        }
    }
}
