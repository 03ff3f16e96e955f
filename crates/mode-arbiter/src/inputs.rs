//! Per-frame inputs consumed by [`crate::arbiter::ModeArbiter`].

use planner_types::LaneChangeState;

/// Snapshot of everything the arbiter needs to pick a path source this frame.
///
/// `lll_prob`/`rll_prob` are expected to already carry the lane-change
/// fade-out scaling (spec.md §4.3: the caller multiplies both by
/// `lane_change_ll_prob` before arbitration runs whenever a lane change is
/// underway).
#[derive(Debug, Clone, Copy)]
pub struct ArbiterInputs {
    pub v_ego: f64,
    pub lll_prob: f64,
    pub rll_prob: f64,
    pub lead_d_rel: Option<f64>,
    pub lead_v_rel: Option<f64>,
    pub steering_angle_desired_deg: f64,
    pub steering_angle_deg: f64,
    pub lane_change_state: LaneChangeState,
    /// Lateral offset of the raw model path's first point (meters).
    pub path_y0: f64,
    /// Standard deviation reported for that first point.
    pub path_y0_std: f64,
}
