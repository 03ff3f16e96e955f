//! The published output frame (`lateralPlan`) and optional debug frame.

use serde::{Deserialize, Serialize};

use crate::constants::N;
use crate::desire::{Desire, LaneChangeDirection, LaneChangeState};

/// Everything the downstream steering controller receives each frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LateralPlan {
    pub valid: bool,

    pub lane_width: f32,
    pub d_path_points: Vec<f32>,
    pub l_prob: f32,
    pub r_prob: f32,
    pub d_prob: f32,

    pub raw_curvature: f64,
    pub raw_curvature_rate: f64,
    pub curvature: f64,
    pub curvature_rate: f64,
    pub mpc_solution_valid: bool,

    pub desire: Desire,
    pub lane_change_state: LaneChangeState,
    pub lane_change_direction: LaneChangeDirection,

    pub steer_rate_cost: f64,
    pub output_scale: f32,
    pub v_cruise_set: f32,
    pub v_curvature: f32,
    pub steer_angle_desire_deg: f32,
    pub laneless_mode: bool,
    pub steer_actuator_delay: f64,
    pub standstill_elapsed_time: f64,
}

/// Optional MPC debug frame, published only when `LOG_MPC` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveMpc {
    pub x: [f64; N + 1],
    pub y: [f64; N + 1],
    pub psi: [f64; N + 1],
    pub curvature: [f64; N + 1],
    pub cost: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_plan() -> LateralPlan {
        LateralPlan {
            valid: true,
            lane_width: 3.7,
            d_path_points: vec![0.1, 0.2, -0.05, 0.0],
            l_prob: 0.91,
            r_prob: 0.88,
            d_prob: 0.75,
            raw_curvature: 0.001234567890123,
            raw_curvature_rate: -0.00045,
            curvature: 0.00099,
            curvature_rate: 0.00021,
            mpc_solution_valid: true,
            desire: Desire::LaneChangeLeft,
            lane_change_state: LaneChangeState::LaneChangeStarting,
            lane_change_direction: LaneChangeDirection::Left,
            steer_rate_cost: 0.8,
            output_scale: 0.42,
            v_cruise_set: 100.0,
            v_curvature: 0.0005,
            steer_angle_desire_deg: 3.5,
            laneless_mode: false,
            steer_actuator_delay: 0.2,
            standstill_elapsed_time: 0.0,
        }
    }

    #[test]
    fn lateral_plan_round_trips_through_json() {
        let plan = sample_plan();
        let encoded = serde_json::to_string(&plan).expect("serialize");
        let decoded: LateralPlan = serde_json::from_str(&encoded).expect("deserialize");
        assert_eq!(plan, decoded);
        assert_eq!(plan.raw_curvature.to_bits(), decoded.raw_curvature.to_bits());
        assert_eq!(plan.curvature_rate.to_bits(), decoded.curvature_rate.to_bits());
    }
}
