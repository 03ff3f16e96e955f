//! Path-source arbitration (spec.md §4.3 / C3).

use planner_types::{clip, linear_interp, LaneChangeState, McpWeights, PathSource};
use tracing::debug;

use crate::config::ArbiterConfig;
use crate::context::{ArbiterContext, LanelessMode};
use crate::inputs::ArbiterInputs;

/// Result of one arbitration pass: which path to feed the MPC driver, and
/// the cost weights it should solve with.
#[derive(Debug, Clone, Copy)]
pub struct ArbiterDecision {
    pub source: PathSource,
    pub weights: McpWeights,
    /// Published as `lanelessMode` — true whenever the raw model path won.
    pub laneless_status: bool,
}

/// Picks between the lane-line-anchored path and the raw model path every
/// frame, and scales the MPC cost weights to match.
#[derive(Debug, Clone, Copy)]
pub struct ModeArbiter {
    config: ArbiterConfig,
}

impl ModeArbiter {
    pub fn new(config: ArbiterConfig) -> Self {
        Self { config }
    }

    fn laneless_weights(&self, inputs: &ArbiterInputs) -> McpWeights {
        let (lo, hi) = self.config.laneless_path_cost_clip;
        let path_cost = clip(
            (inputs.path_y0 / inputs.path_y0_std).abs(),
            lo,
            hi,
        ) * self.config.path_cost;
        let heading_cost = linear_interp(
            inputs.v_ego,
            &self.config.heading_cost_speeds,
            &[self.config.heading_cost, 0.0],
        );
        McpWeights {
            path_cost,
            heading_cost,
            steer_rate_cost: 0.0,
        }
    }

    fn lane_weights(&self) -> McpWeights {
        McpWeights {
            path_cost: self.config.path_cost,
            heading_cost: self.config.heading_cost,
            steer_rate_cost: 0.0,
        }
    }

    /// Select a path source for this frame and update `context`'s hysteresis
    /// state. `steer_rate_cost` is filled in by the caller afterward (it
    /// does not depend on which path was selected).
    pub fn step(&self, context: &mut ArbiterContext, inputs: &ArbiterInputs) -> ArbiterDecision {
        let lead_kicks_in = match (inputs.lead_d_rel, inputs.lead_v_rel) {
            (Some(d_rel), Some(v_rel)) => {
                d_rel < self.config.stopping_lead_distance_m
                    && (v_rel < 0.0 || (v_rel >= 0.0 && inputs.v_ego < self.config.stopping_lead_v_ego_m_s))
                    && (inputs.steering_angle_desired_deg.abs() - inputs.steering_angle_deg.abs())
                        > self.config.stopping_steer_angle_divergence_deg
                    && inputs.lane_change_state == LaneChangeState::Off
            }
            _ => false,
        };

        let avg_prob = (inputs.lll_prob + inputs.rll_prob) / 2.0;

        // The stopping-lead kick-in and its release are checked ahead of
        // `laneless_mode == AlwaysLane` rather than after it: the source
        // this was distilled from nests the kick-in behind that check,
        // which makes it unreachable whenever `laneless_mode == 0` — but
        // that is exactly the configuration the kick-in scenario specifies,
        // so the two branches must not be mutually exclusive.
        let decision = if context.use_lanelines {
            context.laneless_status = false;
            ArbiterDecision {
                source: PathSource::Lane,
                weights: self.lane_weights(),
                laneless_status: false,
            }
        } else if lead_kicks_in {
            context.at_stopping = true;
            context.stopping_ticks = self.config.stopping_ticks;
            context.laneless_status = true;
            ArbiterDecision {
                source: PathSource::Laneless,
                weights: self.laneless_weights(inputs),
                laneless_status: true,
            }
        } else if context.at_stopping
            && (inputs.v_ego < self.config.stopping_release_v_ego_m_s || context.stopping_ticks == 0)
        {
            context.at_stopping = false;
            context.laneless_status = false;
            ArbiterDecision {
                source: PathSource::Lane,
                weights: self.lane_weights(),
                laneless_status: false,
            }
        } else if context.laneless_mode == LanelessMode::AlwaysLane {
            context.laneless_status = false;
            ArbiterDecision {
                source: PathSource::Lane,
                weights: self.lane_weights(),
                laneless_status: false,
            }
        } else if context.laneless_mode == LanelessMode::AlwaysLaneless {
            context.laneless_status = true;
            ArbiterDecision {
                source: PathSource::Laneless,
                weights: self.laneless_weights(inputs),
                laneless_status: true,
            }
        } else if context.laneless_mode == LanelessMode::Auto
            && avg_prob < self.config.laneless_auto_low_prob
            && inputs.lane_change_state == LaneChangeState::Off
        {
            context.laneless_status = true;
            context.buffer = true;
            ArbiterDecision {
                source: PathSource::Laneless,
                weights: self.laneless_weights(inputs),
                laneless_status: true,
            }
        } else if context.laneless_mode == LanelessMode::Auto
            && avg_prob > self.config.laneless_auto_high_prob
            && context.buffer
            && !context.at_stopping
            && inputs.lane_change_state == LaneChangeState::Off
        {
            context.laneless_status = false;
            context.buffer = false;
            ArbiterDecision {
                source: PathSource::Lane,
                weights: self.lane_weights(),
                laneless_status: false,
            }
        } else if context.laneless_mode == LanelessMode::Auto
            && context.buffer
            && inputs.lane_change_state == LaneChangeState::Off
        {
            context.laneless_status = true;
            ArbiterDecision {
                source: PathSource::Laneless,
                weights: self.laneless_weights(inputs),
                laneless_status: true,
            }
        } else {
            context.laneless_status = false;
            context.buffer = false;
            ArbiterDecision {
                source: PathSource::Lane,
                weights: self.lane_weights(),
                laneless_status: false,
            }
        };

        if context.stopping_ticks > 0 {
            context.stopping_ticks -= 1;
        }

        debug!(
            source = ?decision.source,
            laneless_status = decision.laneless_status,
            at_stopping = context.at_stopping,
            buffer = context.buffer,
            "mode arbiter step"
        );

        decision
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_inputs() -> ArbiterInputs {
        ArbiterInputs {
            v_ego: 20.0,
            lll_prob: 0.9,
            rll_prob: 0.9,
            lead_d_rel: None,
            lead_v_rel: None,
            steering_angle_desired_deg: 0.0,
            steering_angle_deg: 0.0,
            lane_change_state: LaneChangeState::Off,
            path_y0: 0.1,
            path_y0_std: 0.2,
        }
    }

    #[test]
    fn use_lanelines_always_wins() {
        let arbiter = ModeArbiter::new(ArbiterConfig::default());
        let mut context = ArbiterContext {
            use_lanelines: true,
            ..ArbiterContext::default()
        };
        let decision = arbiter.step(&mut context, &base_inputs());
        assert_eq!(decision.source, PathSource::Lane);
        assert!(!decision.laneless_status);
    }

    #[test]
    fn stopping_lead_kicks_in_laneless() {
        let arbiter = ModeArbiter::new(ArbiterConfig::default());
        let mut context = ArbiterContext {
            use_lanelines: false,
            laneless_mode: LanelessMode::AlwaysLane,
            ..ArbiterContext::default()
        };
        let inputs = ArbiterInputs {
            v_ego: 3.0,
            lead_d_rel: Some(10.0),
            lead_v_rel: Some(-1.0),
            steering_angle_desired_deg: 10.0,
            steering_angle_deg: 0.0,
            ..base_inputs()
        };
        let decision = arbiter.step(&mut context, &inputs);
        assert_eq!(decision.source, PathSource::Laneless);
        assert!(context.at_stopping);
        assert_eq!(context.stopping_ticks, ArbiterConfig::default().stopping_ticks - 1);
    }

    #[test]
    fn at_stopping_releases_once_stationary() {
        let arbiter = ModeArbiter::new(ArbiterConfig::default());
        let mut context = ArbiterContext {
            use_lanelines: false,
            laneless_mode: LanelessMode::AlwaysLane,
            at_stopping: true,
            stopping_ticks: 5,
            ..ArbiterContext::default()
        };
        let inputs = ArbiterInputs {
            v_ego: 0.1,
            ..base_inputs()
        };
        let decision = arbiter.step(&mut context, &inputs);
        assert_eq!(decision.source, PathSource::Lane);
        assert!(!context.at_stopping);
    }

    #[test]
    fn auto_mode_switches_to_laneless_below_low_prob_threshold() {
        let arbiter = ModeArbiter::new(ArbiterConfig::default());
        let mut context = ArbiterContext {
            use_lanelines: false,
            laneless_mode: LanelessMode::Auto,
            ..ArbiterContext::default()
        };
        let inputs = ArbiterInputs {
            lll_prob: 0.05,
            rll_prob: 0.05,
            ..base_inputs()
        };
        let decision = arbiter.step(&mut context, &inputs);
        assert_eq!(decision.source, PathSource::Laneless);
        assert!(context.buffer);
    }

    #[test]
    fn auto_mode_buffer_latches_until_high_prob_restored() {
        let arbiter = ModeArbiter::new(ArbiterConfig::default());
        let mut context = ArbiterContext {
            use_lanelines: false,
            laneless_mode: LanelessMode::Auto,
            buffer: true,
            ..ArbiterContext::default()
        };
        let mid_prob_inputs = ArbiterInputs {
            lll_prob: 0.3,
            rll_prob: 0.3,
            ..base_inputs()
        };
        let decision = arbiter.step(&mut context, &mid_prob_inputs);
        assert_eq!(decision.source, PathSource::Laneless);
        assert!(context.buffer);

        let high_prob_inputs = ArbiterInputs {
            lll_prob: 0.9,
            rll_prob: 0.9,
            ..base_inputs()
        };
        let decision = arbiter.step(&mut context, &high_prob_inputs);
        assert_eq!(decision.source, PathSource::Lane);
        assert!(!context.buffer);
    }
}
