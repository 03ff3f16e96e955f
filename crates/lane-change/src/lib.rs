//! Lane-change state machine (C2)
//!
//! Tracks blinker, driver torque, blind-spot, and lane-line transition
//! signals to move through `off -> preLaneChange -> laneChangeStarting ->
//! laneChangeFinishing -> off`, producing a `Desire` and a fade scalar
//! (`ll_prob`) the mode arbiter uses to suppress lane-line influence
//! during the maneuver.

pub mod config;
pub mod context;
pub mod inputs;
pub mod state_machine;

pub use config::{AutoDelay, LaneChangeConfig};
pub use context::LaneChangeContext;
pub use inputs::LaneChangeInputs;
pub use state_machine::LaneChangeStateMachine;
