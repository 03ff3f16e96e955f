//! Lane-change state/direction and the `Desire` they resolve to.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LaneChangeState {
    #[default]
    Off,
    PreLaneChange,
    LaneChangeStarting,
    LaneChangeFinishing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LaneChangeDirection {
    #[default]
    None,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Desire {
    #[default]
    None,
    LaneChangeLeft,
    LaneChangeRight,
}

/// Compile-time lookup table, spec.md §4.2: `Desire` is a pure function of
/// `(direction, state)`. Indexed as `DESIRE_TABLE[direction][state]`.
const DESIRE_TABLE: [[Desire; 4]; 3] = {
    use Desire::*;
    [
        // LaneChangeDirection::None
        [None, None, None, None],
        // LaneChangeDirection::Left
        [None, None, LaneChangeLeft, LaneChangeLeft],
        // LaneChangeDirection::Right
        [None, None, LaneChangeRight, LaneChangeRight],
    ]
};

/// Look up `Desire` for a `(state, direction)` pair (spec.md §4.2 table).
pub fn desire_for(state: LaneChangeState, direction: LaneChangeDirection) -> Desire {
    let row = match direction {
        LaneChangeDirection::None => 0,
        LaneChangeDirection::Left => 1,
        LaneChangeDirection::Right => 2,
    };
    let col = match state {
        LaneChangeState::Off => 0,
        LaneChangeState::PreLaneChange => 1,
        LaneChangeState::LaneChangeStarting => 2,
        LaneChangeState::LaneChangeFinishing => 3,
    };
    DESIRE_TABLE[row][col]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_matches_spec() {
        assert_eq!(
            desire_for(LaneChangeState::Off, LaneChangeDirection::Left),
            Desire::None
        );
        assert_eq!(
            desire_for(LaneChangeState::LaneChangeStarting, LaneChangeDirection::Left),
            Desire::LaneChangeLeft
        );
        assert_eq!(
            desire_for(LaneChangeState::LaneChangeFinishing, LaneChangeDirection::Right),
            Desire::LaneChangeRight
        );
        assert_eq!(
            desire_for(LaneChangeState::PreLaneChange, LaneChangeDirection::Right),
            Desire::None
        );
    }
}
