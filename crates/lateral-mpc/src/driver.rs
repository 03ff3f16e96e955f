//! MPC driver (spec.md §4.4 / C4): owns solver warm-start state, re-seeds
//! curvature between frames, and latches solution validity.

use std::time::{Duration, Instant};

use mpc_solver::MpcSolver;
use planner_types::constants::{MPC_INFEASIBLE_COST, MPC_INVALID_LATCH_COUNT, NAN_WARNING_RATE_LIMIT_S, N};
use planner_types::{linear_interp, McpWeights, MpcSolution, MpcState};

/// Result of one `LateralMpcDriver::step` call.
#[derive(Debug, Clone)]
pub struct MpcOutput {
    pub solution: MpcSolution,
    /// False once three consecutive frames have produced NaNs or an
    /// infeasible cost (spec.md §4.4 edge cases).
    pub solution_valid: bool,
}

pub struct LateralMpcDriver<S> {
    solver: S,
    state: MpcState,
    solution_invalid_cnt: u32,
    last_nan_warning: Option<Instant>,
}

impl<S: MpcSolver> LateralMpcDriver<S> {
    pub fn new(mut solver: S) -> Self {
        solver.init();
        Self {
            solver,
            state: MpcState::default(),
            solution_invalid_cnt: 0,
            last_nan_warning: None,
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn step(
        &mut self,
        weights: McpWeights,
        v_ego: f64,
        car_rotation_radius: f64,
        measured_curvature: f64,
        t_idxs: &[f64; N + 1],
        y_pts: &[f64; N + 1],
        heading_pts: &[f64; N + 1],
    ) -> MpcOutput {
        self.solver
            .set_weights(weights.path_cost, weights.heading_cost, weights.steer_rate_cost);

        let solution = self
            .solver
            .run(&self.state, v_ego, car_rotation_radius, t_idxs, y_pts, heading_pts);

        let nans = solution.has_nan_curvature();
        if nans {
            self.solver.init();
            self.state.curvature = measured_curvature;
            self.warn_nan_rate_limited();
        } else {
            self.state.x = 0.0;
            self.state.y = 0.0;
            self.state.psi = 0.0;
            self.state.curvature = linear_interp(planner_types::constants::DT, t_idxs, &solution.curvature);
        }

        if nans || solution.cost > MPC_INFEASIBLE_COST {
            self.solution_invalid_cnt += 1;
        } else {
            self.solution_invalid_cnt = 0;
        }

        MpcOutput {
            solution,
            solution_valid: self.solution_invalid_cnt < MPC_INVALID_LATCH_COUNT,
        }
    }

    fn warn_nan_rate_limited(&mut self) {
        let now = Instant::now();
        let due = match self.last_nan_warning {
            None => true,
            Some(last) => now.duration_since(last) > Duration::from_secs_f64(NAN_WARNING_RATE_LIMIT_S),
        };
        if due {
            self.last_nan_warning = Some(now);
            tracing::warn!("lateral mpc solution contains NaN curvature, reinitializing solver");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mpc_solver::ReferenceMpcSolver;

    fn flat_t_idxs() -> [f64; N + 1] {
        let mut t = [0.0; N + 1];
        for i in 0..=N {
            t[i] = i as f64 * 0.05;
        }
        t
    }

    #[test]
    fn valid_solution_resets_invalid_count() {
        let mut driver = LateralMpcDriver::new(ReferenceMpcSolver::new());
        let weights = McpWeights {
            path_cost: 1.0,
            heading_cost: 1.0,
            steer_rate_cost: 1.0,
        };
        let t_idxs = flat_t_idxs();
        let y_pts = [0.0; N + 1];
        let heading_pts = [0.0; N + 1];
        let out = driver.step(weights, 20.0, 0.0, 0.0, &t_idxs, &y_pts, &heading_pts);
        assert!(out.solution_valid);
    }

    #[test]
    fn nan_curvature_reinitializes_from_measured() {
        let mut driver = LateralMpcDriver::new(ReferenceMpcSolver::new());
        driver.state.curvature = f64::NAN;
        let weights = McpWeights {
            path_cost: 1.0,
            heading_cost: 1.0,
            steer_rate_cost: 1.0,
        };
        let t_idxs = flat_t_idxs();
        let y_pts = [0.0; N + 1];
        let heading_pts = [0.0; N + 1];
        let out = driver.step(weights, 20.0, 0.0, 0.01, &t_idxs, &y_pts, &heading_pts);
        assert!(out.solution.has_nan_curvature());
        assert_eq!(driver.state.curvature, 0.01);
        // A single bad frame only counts once; the latch needs three.
        assert!(out.solution_valid);
    }

    #[test]
    fn nan_latch_trips_after_three_and_clears_on_one_clean_frame() {
        let mut driver = LateralMpcDriver::new(ReferenceMpcSolver::new());
        let weights = McpWeights {
            path_cost: 1.0,
            heading_cost: 1.0,
            steer_rate_cost: 1.0,
        };
        let t_idxs = flat_t_idxs();
        let y_pts = [0.0; N + 1];
        let heading_pts = [0.0; N + 1];

        for _ in 0..2 {
            driver.state.curvature = f64::NAN;
            let out = driver.step(weights, 20.0, 0.0, 0.0, &t_idxs, &y_pts, &heading_pts);
            assert!(out.solution_valid);
        }

        driver.state.curvature = f64::NAN;
        let third = driver.step(weights, 20.0, 0.0, 0.0, &t_idxs, &y_pts, &heading_pts);
        assert!(!third.solution_valid);

        let clean = driver.step(weights, 20.0, 0.0, 0.0, &t_idxs, &y_pts, &heading_pts);
        assert!(clean.solution_valid);
    }
}
