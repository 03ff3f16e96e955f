//! Fixed sizes and numeric constants shared by every planner crate.
//!
//! Kept byte-for-byte identical to the constants in the lateral planner
//! this workspace reimplements, since a steering controller downstream
//! depends on their exact values.

/// Vision model trajectory horizon (number of samples per frame).
pub const H: usize = 33;

/// MPC prediction horizon (steps), plus the initial state.
pub const N: usize = 16;

/// Model frame period, seconds.
pub const DT: f64 = 0.05;

/// Car rotation radius used by the MPC solver's bicycle model (meters).
pub const CAR_ROTATION_RADIUS: f64 = 0.0;

/// Maximum curvature-rate envelope, indexed against [`MAX_CURVATURE_RATE_SPEEDS`].
///
/// Corresponds to 80deg/s and 20deg/s steering angle rate in a reference vehicle.
pub const MAX_CURVATURE_RATES: [f64; 2] = [0.03762194918267951, 0.003441203371932992];

/// Speed breakpoints (m/s) for [`MAX_CURVATURE_RATES`].
pub const MAX_CURVATURE_RATE_SPEEDS: [f64; 2] = [0.0, 35.0];

/// Lane-change global abort timer, seconds.
pub const LANE_CHANGE_TIME_MAX: f64 = 10.0;

/// Margin below `steerMaxV` that forces a lane-change abort once sustained.
pub const LANE_CHANGE_OUTPUT_SCALE_MARGIN: f64 = 0.15;

/// How long the output-scale abort condition must hold before firing.
pub const LANE_CHANGE_OUTPUT_SCALE_TIMER_MIN: f64 = 1.0;

/// `ll_prob` fade-out rate breakpoints during `laneChangeStarting`, (v_ego, rate).
pub const LANE_CHANGE_FADE_SPEEDS: [f64; 4] = [8.3, 16.0, 22.0, 30.0];
pub const LANE_CHANGE_FADE_RATES: [f64; 4] = [0.1, 0.17, 0.7, 1.2];

/// Certainty thresholds gating `laneChangeStarting -> laneChangeFinishing`.
///
/// This is the live (non-commented) branch of the source this was distilled
/// from; a stricter 0.03/0.02 pair exists only in a dead alternate branch
/// and is deliberately not implemented.
pub const LANE_CHANGE_PROB_DONE: f64 = 0.02;
pub const LANE_CHANGE_LL_PROB_DONE: f64 = 0.01;

/// `ll_prob` threshold above which `laneChangeFinishing` resolves.
pub const LANE_CHANGE_LL_PROB_RESTORED: f64 = 0.99;

/// MPC solver cost above which a solution is considered infeasible.
pub const MPC_INFEASIBLE_COST: f64 = 20000.0;

/// Consecutive infeasible solutions before `mpcSolutionValid` latches false.
pub const MPC_INVALID_LATCH_COUNT: u32 = 3;

/// Minimum interval between repeated NaN-solver warnings, seconds.
pub const NAN_WARNING_RATE_LIMIT_S: f64 = 5.0;

/// `STEER_RATE_COST` ramp breakpoints (v_ego): the third value is `CP.steer_rate_cost`.
pub const STEER_RATE_COST_SPEEDS: [f64; 3] = [1.0, 8.0, 15.0];

/// Lead-vehicle proximity threshold for the stopping-laneless kick-in, meters.
pub const STOPPING_LEAD_DISTANCE_M: f64 = 25.0;

/// Ego speed threshold used alongside a non-negative lead relative velocity.
pub const STOPPING_LEAD_V_EGO_M_S: f64 = 5.0;

/// Desired-vs-measured steering angle divergence that arms the stopping kick-in, degrees.
pub const STOPPING_STEER_ANGLE_DIVERGENCE_DEG: f64 = 2.0;

/// Debounce length for the stopping-laneless mode, in planner ticks.
pub const STOPPING_TICKS: u32 = 60;

/// Ego speed below which the stopping-laneless mode releases back to lane-lines.
pub const STOPPING_RELEASE_V_EGO_M_S: f64 = 0.5;

/// Lane-line confidence hysteresis thresholds for `laneless_mode == 2`.
pub const LANELESS_AUTO_LOW_PROB: f64 = 0.2;
pub const LANELESS_AUTO_HIGH_PROB: f64 = 0.4;

/// Lane/laneless cost weight ramp for `heading_cost`, speed breakpoints (m/s).
pub const HEADING_COST_SPEEDS: [f64; 2] = [5.0, 10.0];

/// Clip range applied to the laneless `path_cost` scale factor.
pub const LANELESS_PATH_COST_CLIP: (f64, f64) = (0.5, 5.0);

/// km/h to m/s conversion, matching `common.numpy_fast` unit handling upstream.
pub const KPH_TO_MS: f64 = 1.0 / 3.6;
