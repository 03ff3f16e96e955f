//! Lane-line model adapter (C1)
//!
//! Parses vision-model frames into per-side line probabilities and a
//! blended driving path, tracking a low-passed lane width and path-synthesis
//! confidence across frames.

pub mod adapter;
pub mod config;

pub use adapter::LaneLineAdapter;
pub use config::LaneLinesConfig;
