//! Lane-change state machine configuration.

use serde::{Deserialize, Serialize};

/// Discrete auto-lane-change delay options, seconds. Matches the
/// `OpkrAutoLaneChangeDelay` parameter-store enum (0..=5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AutoDelay {
    Off,
    Ms200,
    Ms500,
    S1,
    S1_5,
    S2,
}

impl AutoDelay {
    pub fn from_index(index: u8) -> Self {
        match index {
            0 => AutoDelay::Off,
            1 => AutoDelay::Ms200,
            2 => AutoDelay::Ms500,
            3 => AutoDelay::S1,
            4 => AutoDelay::S1_5,
            _ => AutoDelay::S2,
        }
    }

    pub fn seconds(self) -> f64 {
        match self {
            AutoDelay::Off => 0.0,
            AutoDelay::Ms200 => 0.2,
            AutoDelay::Ms500 => 0.5,
            AutoDelay::S1 => 1.0,
            AutoDelay::S1_5 => 1.5,
            AutoDelay::S2 => 2.0,
        }
    }
}

/// Tunables for [`crate::state_machine::LaneChangeStateMachine`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LaneChangeConfig {
    pub auto_delay: AutoDelay,
    /// Minimum ego speed required to start or continue a lane change, m/s.
    pub min_speed_m_s: f64,
}

impl Default for LaneChangeConfig {
    fn default() -> Self {
        Self {
            auto_delay: AutoDelay::Off,
            min_speed_m_s: 8.33,
        }
    }
}
