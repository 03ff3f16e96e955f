//! Native MPC solver contract and a pure-Rust reference implementation.
//!
//! The real stack links a compiled QP solver behind this same trait; the
//! reference solver here exists so the rest of the planner can be built and
//! tested without that native dependency. It linearizes the single-track
//! bicycle model around zero heading (valid for the small headings lateral
//! planning operates at) which turns curvature-rate optimization into an
//! unconstrained linear least-squares problem, solved in closed form.

use nalgebra::{DMatrix, DVector};
use planner_types::constants::N;
use planner_types::{MpcSolution, MpcState};

/// Behavior every MPC solver backend must provide.
pub trait MpcSolver {
    /// Reset any internal warm-start state. Called once at construction.
    fn init(&mut self);

    /// Update the cost weights used by subsequent `run` calls.
    fn set_weights(&mut self, path_cost: f64, heading_cost: f64, steer_rate_cost: f64);

    /// Solve the horizon starting from `state`, tracking `y_pts`/`heading_pts`
    /// sampled at `t_idxs` (seconds from now), at constant speed `v_ego`.
    ///
    /// `car_rotation_radius` shifts the lateral measurement point forward of
    /// the rear axle by that many meters before it's compared to `y_pts`.
    #[allow(clippy::too_many_arguments)]
    fn run(
        &mut self,
        state: &MpcState,
        v_ego: f64,
        car_rotation_radius: f64,
        t_idxs: &[f64; N + 1],
        y_pts: &[f64; N + 1],
        heading_pts: &[f64; N + 1],
    ) -> MpcSolution;
}

/// Pure-Rust linearized bicycle-model solver.
///
/// Decision variables are the `N` curvature rates. Given those, the states
/// `(x, y, psi, curvature)` evolve by forward Euler integration, linearized
/// by treating `sin(psi) ~= psi` and `cos(psi) ~= 1` (openpilot's lateral
/// MPC makes the same small-angle assumption at the cost-function level).
/// Because the resulting map from curvature-rate to `(y, psi)` residuals is
/// linear, the least-squares optimum is the solution of a normal-equations
/// system rather than an iterative search.
pub struct ReferenceMpcSolver {
    path_cost: f64,
    heading_cost: f64,
    steer_rate_cost: f64,
}

impl Default for ReferenceMpcSolver {
    fn default() -> Self {
        Self {
            path_cost: crate::constants::PATH_COST,
            heading_cost: crate::constants::HEADING_COST,
            steer_rate_cost: 1.0,
        }
    }
}

impl ReferenceMpcSolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forward-simulate `(y, psi, curvature)` for a given curvature-rate
    /// sequence, starting from `state`. Returns the `N + 1`-length arrays.
    fn simulate(
        &self,
        state: &MpcState,
        v_ego: f64,
        t_idxs: &[f64; N + 1],
        curvature_rate: &[f64],
    ) -> ([f64; N + 1], [f64; N + 1], [f64; N + 1], [f64; N + 1]) {
        let mut x = [0.0; N + 1];
        let mut y = [0.0; N + 1];
        let mut psi = [0.0; N + 1];
        let mut curvature = [0.0; N + 1];
        x[0] = state.x;
        y[0] = state.y;
        psi[0] = state.psi;
        curvature[0] = state.curvature;
        for i in 0..N {
            let dt = (t_idxs[i + 1] - t_idxs[i]).max(0.0);
            x[i + 1] = x[i] + v_ego * dt;
            y[i + 1] = y[i] + v_ego * dt * psi[i];
            psi[i + 1] = psi[i] + v_ego * dt * curvature[i];
            curvature[i + 1] = curvature[i] + curvature_rate[i] * dt;
        }
        (x, y, psi, curvature)
    }
}

impl MpcSolver for ReferenceMpcSolver {
    fn init(&mut self) {
        self.path_cost = crate::constants::PATH_COST;
        self.heading_cost = crate::constants::HEADING_COST;
        self.steer_rate_cost = 1.0;
    }

    fn set_weights(&mut self, path_cost: f64, heading_cost: f64, steer_rate_cost: f64) {
        self.path_cost = path_cost;
        self.heading_cost = heading_cost;
        self.steer_rate_cost = steer_rate_cost;
    }

    fn run(
        &mut self,
        state: &MpcState,
        v_ego: f64,
        car_rotation_radius: f64,
        t_idxs: &[f64; N + 1],
        y_pts: &[f64; N + 1],
        heading_pts: &[f64; N + 1],
    ) -> MpcSolution {
        let zero_rate = vec![0.0; N];
        let (_, base_y, base_psi, _) = self.simulate(state, v_ego, t_idxs, &zero_rate);

        // Impulse-response columns: effect of a unit curvature-rate at step j
        // on every (y, psi) residual row. Exact because the dynamics above
        // are linear in curvature_rate.
        let rows = 2 * (N + 1);
        let mut a = DMatrix::<f64>::zeros(rows, N);
        for j in 0..N {
            let mut impulse = vec![0.0; N];
            impulse[j] = 1.0;
            let (_, y, psi, _) = self.simulate(state, v_ego, t_idxs, &impulse);
            for i in 0..=N {
                let dy = y[i] - base_y[i];
                let dpsi = psi[i] - base_psi[i];
                a[(i, j)] = self.path_cost.sqrt() * dy;
                a[(N + 1 + i, j)] = self.heading_cost.sqrt() * dpsi;
            }
        }

        let mut b = DVector::<f64>::zeros(rows);
        for i in 0..=N {
            let sensor_y = base_y[i] + car_rotation_radius * base_psi[i];
            b[i] = self.path_cost.sqrt() * (y_pts[i] - sensor_y);
            b[N + 1 + i] = self.heading_cost.sqrt() * (heading_pts[i] - base_psi[i]);
        }

        let ata = a.transpose() * &a
            + DMatrix::<f64>::identity(N, N) * self.steer_rate_cost.max(1e-6);
        let atb = a.transpose() * &b;

        let curvature_rate = match ata.clone().lu().solve(&atb) {
            Some(u) => u.iter().copied().collect::<Vec<_>>(),
            None => vec![0.0; N],
        };

        let (x, y, psi, curvature) = self.simulate(state, v_ego, t_idxs, &curvature_rate);

        let mut cost = 0.0;
        for i in 0..=N {
            let sensor_y = y[i] + car_rotation_radius * psi[i];
            cost += self.path_cost * (sensor_y - y_pts[i]).powi(2);
            cost += self.heading_cost * (psi[i] - heading_pts[i]).powi(2);
        }
        for r in &curvature_rate {
            cost += self.steer_rate_cost * r.powi(2);
        }

        let mut solution = MpcSolution {
            x,
            y,
            psi,
            curvature,
            curvature_rate: [0.0; N],
            cost,
        };
        solution.curvature_rate.copy_from_slice(&curvature_rate);
        solution
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn straight_zero_target_yields_zero_curvature() {
        let mut solver = ReferenceMpcSolver::new();
        solver.set_weights(1.0, 1.0, 1.0);
        let state = MpcState::default();
        let t_idxs = default_t_idxs();
        let y_pts = [0.0; N + 1];
        let heading_pts = [0.0; N + 1];
        let solution = solver.run(&state, 20.0, 0.0, &t_idxs, &y_pts, &heading_pts);
        for v in solution.curvature {
            assert!(v.abs() < 1e-9);
        }
        assert!(solution.cost < 1e-9);
    }

    #[test]
    fn constant_lateral_offset_pulls_curvature_positive() {
        let mut solver = ReferenceMpcSolver::new();
        solver.set_weights(1.0, 1.0, 0.1);
        let state = MpcState::default();
        let t_idxs = default_t_idxs();
        let y_pts = [1.0; N + 1];
        let heading_pts = [0.0; N + 1];
        let solution = solver.run(&state, 15.0, 0.0, &t_idxs, &y_pts, &heading_pts);
        assert!(solution.curvature[N] > 0.0);
    }

    fn default_t_idxs() -> [f64; N + 1] {
        let mut t = [0.0; N + 1];
        for i in 0..=N {
            t[i] = i as f64 * 0.05;
        }
        t
    }
}
