//! Per-side lane-line descriptors, as delivered by the vision model.

use serde::{Deserialize, Serialize};

/// One lane line (left or right) for a single frame.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LaneLineSide {
    /// Model confidence that this line exists, in [0, 1].
    pub prob: f32,
    /// Sampled `(x, y)` points along the line, in the model's own frame.
    pub points: Vec<(f32, f32)>,
    /// Probability the line is about to disappear (lane-change hint).
    pub lane_change_prob: f32,
}

/// Both lane lines for one vision frame.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LaneLineFrame {
    pub left: LaneLineSide,
    pub right: LaneLineSide,
}
