//! Lane-line adapter configuration.

use serde::{Deserialize, Serialize};

/// Tunables for [`crate::adapter::LaneLineAdapter`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LaneLinesConfig {
    /// Low-pass rate applied to the per-side line probabilities, in [0, 1].
    pub prob_lowpass_rate: f32,
    /// Low-pass rate applied to the lane-width estimate.
    pub lane_width_lowpass_rate: f32,
    /// Default lane width assumed before any estimate has formed, meters.
    pub default_lane_width: f32,
    /// Lane width beyond which an estimate is treated as implausible.
    pub max_plausible_lane_width: f32,
}

impl Default for LaneLinesConfig {
    fn default() -> Self {
        Self {
            prob_lowpass_rate: 0.3,
            lane_width_lowpass_rate: 0.1,
            default_lane_width: 3.7,
            max_plausible_lane_width: 5.0,
        }
    }
}
