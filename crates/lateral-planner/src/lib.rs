//! Top-level lateral motion planner: ties the lane-line adapter,
//! lane-change state machine, mode arbiter, MPC driver, and curvature
//! post-processor into a single per-frame `update`/`publish` pair (C6).

pub mod config;
pub mod inputs;
pub mod logging;
mod planner;

pub use config::PlannerConfig;
pub use inputs::PlannerInputs;
pub use planner::Planner;
