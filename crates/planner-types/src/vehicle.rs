//! Vehicle, controls, and radar state consumed each frame.

use serde::{Deserialize, Serialize};

/// `carState` fields the planner reads.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct CarState {
    pub v_ego: f32,
    pub standstill: bool,
    pub left_blinker: bool,
    pub right_blinker: bool,
    pub steering_pressed: bool,
    pub steering_torque: f32,
    pub left_blindspot: bool,
    pub right_blindspot: bool,
    pub steering_angle_deg: f32,
    pub valid: bool,
    pub alive: bool,
}

/// Tagged union over the three supported lateral-control output variants.
///
/// `CP.lateralTuning.which()` in the upstream system selects which arm of
/// `controlsState.lateralControlState` is populated; we model that choice
/// as an enum instead of three optional fields.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum LateralControlState {
    Pid { output: f32 },
    Indi { output: f32 },
    Lqr { output: f32 },
}

impl LateralControlState {
    /// Uniform extractor over the active variant (spec.md §9 Design Note).
    pub fn output(&self) -> f32 {
        match *self {
            LateralControlState::Pid { output }
            | LateralControlState::Indi { output }
            | LateralControlState::Lqr { output } => output,
        }
    }
}

/// `controlsState` fields the planner reads.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ControlsState {
    pub active: bool,
    pub v_cruise_kph: f32,
    pub curvature: f32,
    pub steering_angle_desired_deg: f32,
    pub lateral_control_state: LateralControlState,
    pub valid: bool,
    pub alive: bool,
}

impl Default for ControlsState {
    fn default() -> Self {
        Self {
            active: false,
            v_cruise_kph: 0.0,
            curvature: 0.0,
            steering_angle_desired_deg: 0.0,
            lateral_control_state: LateralControlState::Pid { output: 0.0 },
            valid: true,
            alive: true,
        }
    }
}

/// Radar lead-vehicle track.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RadarLead {
    pub d_rel: f32,
    pub v_rel: f32,
}

/// `radarState` fields the planner reads.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RadarState {
    pub lead_one: Option<RadarLead>,
}

/// Static, per-session car parameters (`CP`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CarParams {
    pub steer_rate_cost: f64,
    pub steer_max_v: f64,
    pub steer_actuator_delay: f64,
}

impl Default for CarParams {
    fn default() -> Self {
        Self {
            steer_rate_cost: 0.5,
            steer_max_v: 1.0,
            steer_actuator_delay: 0.2,
        }
    }
}
