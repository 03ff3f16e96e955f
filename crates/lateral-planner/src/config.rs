//! Top-level planner configuration: the per-component policy structs plus
//! the static car parameters every component needs a slice of.

use lane_change::LaneChangeConfig;
use lane_lines::LaneLinesConfig;
use mode_arbiter::ArbiterConfig;
use planner_types::CarParams;

/// Everything [`crate::planner::Planner::new`] needs besides a
/// [`config_source::ConfigSource`].
#[derive(Debug, Clone, Copy)]
pub struct PlannerConfig {
    pub car_params: CarParams,
    pub lane_lines: LaneLinesConfig,
    pub lane_change: LaneChangeConfig,
    pub arbiter: ArbiterConfig,
    /// How often to re-poll the parameter store, seconds.
    pub param_poll_interval_s: f64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            car_params: CarParams::default(),
            lane_lines: LaneLinesConfig::default(),
            lane_change: LaneChangeConfig::default(),
            arbiter: ArbiterConfig::default(),
            param_poll_interval_s: 1.0,
        }
    }
}
