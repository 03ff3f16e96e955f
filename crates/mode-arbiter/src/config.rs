//! Mode arbiter constant policy, overridable at construction time.

use planner_types::constants::{
    HEADING_COST_SPEEDS, LANELESS_AUTO_HIGH_PROB, LANELESS_AUTO_LOW_PROB, LANELESS_PATH_COST_CLIP,
    STOPPING_LEAD_DISTANCE_M, STOPPING_LEAD_V_EGO_M_S, STOPPING_RELEASE_V_EGO_M_S,
    STOPPING_STEER_ANGLE_DIVERGENCE_DEG, STOPPING_TICKS,
};

/// Policy constants for [`crate::arbiter::ModeArbiter`] (spec.md §9: magic
/// constants must be configurable at compile time but default exactly as given).
#[derive(Debug, Clone, Copy)]
pub struct ArbiterConfig {
    pub path_cost: f64,
    pub heading_cost: f64,
    pub heading_cost_speeds: [f64; 2],
    pub laneless_path_cost_clip: (f64, f64),
    pub stopping_lead_distance_m: f64,
    pub stopping_lead_v_ego_m_s: f64,
    pub stopping_steer_angle_divergence_deg: f64,
    pub stopping_ticks: u32,
    pub stopping_release_v_ego_m_s: f64,
    pub laneless_auto_low_prob: f64,
    pub laneless_auto_high_prob: f64,
}

impl Default for ArbiterConfig {
    fn default() -> Self {
        Self {
            path_cost: mpc_solver::PATH_COST,
            heading_cost: mpc_solver::HEADING_COST,
            heading_cost_speeds: HEADING_COST_SPEEDS,
            laneless_path_cost_clip: LANELESS_PATH_COST_CLIP,
            stopping_lead_distance_m: STOPPING_LEAD_DISTANCE_M,
            stopping_lead_v_ego_m_s: STOPPING_LEAD_V_EGO_M_S,
            stopping_steer_angle_divergence_deg: STOPPING_STEER_ANGLE_DIVERGENCE_DEG,
            stopping_ticks: STOPPING_TICKS,
            stopping_release_v_ego_m_s: STOPPING_RELEASE_V_EGO_M_S,
            laneless_auto_low_prob: LANELESS_AUTO_LOW_PROB,
            laneless_auto_high_prob: LANELESS_AUTO_HIGH_PROB,
        }
    }
}
