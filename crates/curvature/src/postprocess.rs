//! Curvature post-processor (spec.md §4.5 / C5).
//!
//! Turns the raw MPC solution into the curvature and curvature rate sent to
//! the steering controller: a delay-compensated linearization around the
//! solved heading, then a rate-limiting envelope anchored to the last
//! published curvature.

use planner_types::constants::{DT, MAX_CURVATURE_RATES, MAX_CURVATURE_RATE_SPEEDS};
use planner_types::{clip, linear_interp};

/// `(raw_curvature, raw_curvature_rate, curvature, curvature_rate)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CurvatureOutput {
    pub raw_curvature: f64,
    pub raw_curvature_rate: f64,
    pub curvature: f64,
    pub curvature_rate: f64,
}

/// Carries the previous frame's rate-limited curvature forward.
#[derive(Debug, Clone, Copy, Default)]
pub struct CurvatureLimiter {
    safe_curvature_prev: f64,
}

impl CurvatureLimiter {
    /// `psi_at_delay` is the solved heading interpolated at `steer_actuator_delay`
    /// seconds into the horizon; `current_curvature` and `next_curvature_rate`
    /// come straight off the front of the MPC solution.
    pub fn step(
        &mut self,
        psi_at_delay: f64,
        current_curvature: f64,
        next_curvature_rate: f64,
        v_ego: f64,
        steer_actuator_delay: f64,
    ) -> CurvatureOutput {
        // The MPC may plan to steer and unwind before the actuator catches
        // up, so some corrections never get commanded if we trust its
        // curvature directly. Linearizing around the solved heading instead
        // captures corrections the raw curvature trace would miss.
        let curvature_diff_from_psi =
            psi_at_delay / (v_ego.max(1e-1) * steer_actuator_delay) - current_curvature;
        let raw_curvature = current_curvature + 2.0 * curvature_diff_from_psi;
        let raw_curvature_rate = next_curvature_rate;

        let max_rate = linear_interp(v_ego, &MAX_CURVATURE_RATE_SPEEDS, &MAX_CURVATURE_RATES);
        let curvature_rate = clip(raw_curvature_rate, -max_rate, max_rate);
        let curvature = clip(
            raw_curvature,
            self.safe_curvature_prev - max_rate / DT,
            self.safe_curvature_prev + max_rate / DT,
        );
        self.safe_curvature_prev = curvature;

        CurvatureOutput {
            raw_curvature,
            raw_curvature_rate,
            curvature,
            curvature_rate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_psi_and_curvature_stays_at_rest() {
        let mut limiter = CurvatureLimiter::default();
        let out = limiter.step(0.0, 0.0, 0.0, 20.0, 0.2);
        assert_eq!(out.raw_curvature, 0.0);
        assert_eq!(out.curvature, 0.0);
    }

    #[test]
    fn large_curvature_jump_is_rate_limited() {
        let mut limiter = CurvatureLimiter::default();
        let out = limiter.step(1.0, 0.5, 0.0, 5.0, 0.2);
        let max_rate = linear_interp(5.0, &MAX_CURVATURE_RATE_SPEEDS, &MAX_CURVATURE_RATES);
        assert!(out.curvature <= max_rate / DT + 1e-9);
        assert!(out.raw_curvature > out.curvature);
    }

    #[test]
    fn limiter_anchors_to_previous_output_across_steps() {
        let mut limiter = CurvatureLimiter::default();
        let first = limiter.step(0.05, 0.0, 0.0, 20.0, 0.2);
        let second = limiter.step(0.05, first.curvature, 0.0, 20.0, 0.2);
        assert!((second.curvature - first.curvature).abs() < 1.0);
    }

    proptest::proptest! {
        #[test]
        fn step_to_step_delta_never_exceeds_the_rate_envelope(
            psi_at_delay in -2.0f64..2.0,
            current_curvature in -1.0f64..1.0,
            next_curvature_rate in -5.0f64..5.0,
            v_ego in 0.1f64..40.0,
            steps in 1usize..50,
        ) {
            let mut limiter = CurvatureLimiter::default();
            let mut prev = limiter.safe_curvature_prev;
            for _ in 0..steps {
                let out = limiter.step(psi_at_delay, current_curvature, next_curvature_rate, v_ego, 0.2);
                let max_rate = linear_interp(v_ego, &MAX_CURVATURE_RATE_SPEEDS, &MAX_CURVATURE_RATES);
                prop_assert!((out.curvature - prev).abs() <= max_rate / DT + 1e-6);
                prop_assert!(out.curvature_rate.abs() <= max_rate + 1e-9);
                prev = out.curvature;
            }
        }
    }
}
