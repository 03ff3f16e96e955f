//! Parameter-store abstraction the planner polls at ~1 Hz (spec.md §6).

mod error;
mod params;
mod source;

pub use error::ConfigSourceError;
pub use params::{poll, LateralParams, END_TO_END_TOGGLE, LANELESS_MODE, OPKR_AUTO_LANE_CHANGE_DELAY, OPKR_LANE_CHANGE_SPEED};
pub use source::{ConfigSource, FileConfigSource, StaticConfigSource};
