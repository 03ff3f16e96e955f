//! Vision-model trajectory frame (`modelV2` in spec terms).

use serde::{Deserialize, Serialize};

use crate::constants::H;

/// A single sample of the model's predicted path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TrajectorySample {
    pub t: f32,
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub yaw: f32,
    pub x_std: f32,
    pub y_std: f32,
    pub z_std: f32,
}

/// One full vision-model frame: `H` trajectory samples plus validity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelV2Frame {
    pub position: [TrajectorySample; H],
    pub valid: bool,
    pub alive: bool,
}

impl Default for ModelV2Frame {
    fn default() -> Self {
        Self {
            position: [TrajectorySample::default(); H],
            valid: true,
            alive: true,
        }
    }
}

impl ModelV2Frame {
    /// `t_idxs`: the time grid the model predicted on.
    pub fn t_idxs(&self) -> [f32; H] {
        let mut out = [0.0f32; H];
        for (dst, sample) in out.iter_mut().zip(self.position.iter()) {
            *dst = sample.t;
        }
        out
    }

    /// Predicted heading (yaw) samples.
    pub fn yaw_path(&self) -> [f32; H] {
        let mut out = [0.0f32; H];
        for (dst, sample) in out.iter_mut().zip(self.position.iter()) {
            *dst = sample.yaw;
        }
        out
    }

    pub fn y_std0(&self) -> f32 {
        self.position[0].y_std.max(1e-3)
    }
}
