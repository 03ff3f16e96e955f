//! The specific parameter-store keys this planner polls.

use crate::source::ConfigSource;

pub const END_TO_END_TOGGLE: &str = "EndToEndToggle";
pub const LANELESS_MODE: &str = "LanelessMode";
pub const OPKR_LANE_CHANGE_SPEED: &str = "OpkrLaneChangeSpeed";
pub const OPKR_AUTO_LANE_CHANGE_DELAY: &str = "OpkrAutoLaneChangeDelay";

/// Snapshot of every parameter-store value the planner reacts to, refreshed
/// at ~1 Hz by the caller.
#[derive(Debug, Clone, Copy)]
pub struct LateralParams {
    pub use_lanelines: bool,
    pub laneless_mode: u8,
    pub lane_change_speed_kph: u8,
    pub auto_lane_change_delay_index: u8,
}

/// Reads all four keys, falling back to `defaults` for any key the source
/// doesn't have yet (e.g. before the backing store is populated).
pub fn poll(source: &dyn ConfigSource, defaults: LateralParams) -> LateralParams {
    LateralParams {
        use_lanelines: source
            .get_bool(END_TO_END_TOGGLE)
            .map(|end_to_end| !end_to_end)
            .unwrap_or(defaults.use_lanelines),
        laneless_mode: source.get_u8(LANELESS_MODE).unwrap_or(defaults.laneless_mode),
        lane_change_speed_kph: source
            .get_u8(OPKR_LANE_CHANGE_SPEED)
            .unwrap_or(defaults.lane_change_speed_kph),
        auto_lane_change_delay_index: source
            .get_u8(OPKR_AUTO_LANE_CHANGE_DELAY)
            .unwrap_or(defaults.auto_lane_change_delay_index),
    }
}

impl Default for LateralParams {
    fn default() -> Self {
        Self {
            use_lanelines: true,
            laneless_mode: 0,
            lane_change_speed_kph: 30,
            auto_lane_change_delay_index: 0,
        }
    }
}
