//! Per-step inputs to the lane-change state machine.

/// Everything the state machine needs to decide this step's transition.
#[derive(Debug, Clone, Copy, Default)]
pub struct LaneChangeInputs {
    pub active: bool,
    pub v_ego: f64,
    pub left_blinker: bool,
    pub right_blinker: bool,
    pub steering_pressed: bool,
    pub steering_torque: f64,
    pub left_blindspot: bool,
    pub right_blindspot: bool,
    /// Current lateral controller output magnitude, normalized.
    pub output_scale: f64,
    /// Saturation threshold (`CP.steerMaxV[0]`).
    pub steer_max_v: f64,
    /// Vision hint: probability either lane line is about to disappear.
    pub lane_change_prob: f64,
}
