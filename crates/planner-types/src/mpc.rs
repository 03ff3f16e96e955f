//! MPC state and solution buffers owned by the MPC driver (C4).

use serde::{Deserialize, Serialize};

use crate::constants::N;

/// `(x, y, psi, curvature)` state the solver is seeded with each step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MpcState {
    pub x: f64,
    pub y: f64,
    pub psi: f64,
    pub curvature: f64,
}

/// The solver's output over the `N`-step horizon, plus its scalar cost.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MpcSolution {
    pub x: [f64; N + 1],
    pub y: [f64; N + 1],
    pub psi: [f64; N + 1],
    pub curvature: [f64; N + 1],
    pub curvature_rate: [f64; N],
    pub cost: f64,
}

impl Default for MpcSolution {
    fn default() -> Self {
        Self {
            x: [0.0; N + 1],
            y: [0.0; N + 1],
            psi: [0.0; N + 1],
            curvature: [0.0; N + 1],
            curvature_rate: [0.0; N],
            cost: 0.0,
        }
    }
}

impl MpcSolution {
    /// True if any curvature sample is NaN — the solver's infeasibility signal.
    pub fn has_nan_curvature(&self) -> bool {
        self.curvature.iter().any(|v| v.is_nan())
    }
}
