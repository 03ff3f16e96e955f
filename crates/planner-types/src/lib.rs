//! Shared data model for the lateral motion planner workspace.
//!
//! Every other crate in this workspace depends on this one instead of
//! redeclaring the vision/vehicle/MPC types it shares with its neighbors —
//! the same role `camera_capture::frame::VideoFrame` plays for the `adas`
//! and `dms` crates it was lifted from.

pub mod constants;
pub mod desire;
pub mod interp;
pub mod lane;
pub mod mpc;
pub mod path;
pub mod plan;
pub mod trajectory;
pub mod vehicle;

pub use constants::{CAR_ROTATION_RADIUS, DT, H, N};
pub use desire::{desire_for, Desire, LaneChangeDirection, LaneChangeState};
pub use interp::{clip, linear_interp};
pub use lane::{LaneLineFrame, LaneLineSide};
pub use mpc::{MpcSolution, MpcState};
pub use path::{McpWeights, PathSource, PathXyz};
pub use plan::{LateralPlan, LiveMpc};
pub use trajectory::{ModelV2Frame, TrajectorySample};
pub use vehicle::{CarParams, CarState, ControlsState, LateralControlState, RadarLead, RadarState};
