//! Lane-change state machine (C2).

use planner_types::constants::{
    LANE_CHANGE_FADE_RATES, LANE_CHANGE_FADE_SPEEDS, LANE_CHANGE_LL_PROB_DONE,
    LANE_CHANGE_LL_PROB_RESTORED, LANE_CHANGE_OUTPUT_SCALE_MARGIN,
    LANE_CHANGE_OUTPUT_SCALE_TIMER_MIN, LANE_CHANGE_PROB_DONE, LANE_CHANGE_TIME_MAX,
};
use planner_types::{desire_for, linear_interp, Desire, LaneChangeDirection, LaneChangeState, DT};
use tracing::debug;

use crate::config::LaneChangeConfig;
use crate::context::LaneChangeContext;
use crate::inputs::LaneChangeInputs;

/// Owns a [`LaneChangeContext`] and steps it one frame at a time.
#[derive(Debug, Default)]
pub struct LaneChangeStateMachine {
    pub context: LaneChangeContext,
}

impl LaneChangeStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the state machine by one frame (spec.md §4.2).
    pub fn step(&mut self, inputs: &LaneChangeInputs, config: &LaneChangeConfig) {
        let ctx = &mut self.context;
        let one_blinker = inputs.left_blinker ^ inputs.right_blinker;
        let below_min_speed = inputs.v_ego < config.min_speed_m_s;

        let global_abort = !inputs.active
            || ctx.timer_s > LANE_CHANGE_TIME_MAX
            || (inputs.output_scale.abs() >= inputs.steer_max_v - LANE_CHANGE_OUTPUT_SCALE_MARGIN
                && ctx.timer_s > LANE_CHANGE_OUTPUT_SCALE_TIMER_MIN);

        if global_abort {
            ctx.state = LaneChangeState::Off;
            ctx.direction = LaneChangeDirection::None;
        } else {
            match ctx.state {
                LaneChangeState::Off => {
                    if one_blinker && !ctx.prev_one_blinker && !below_min_speed {
                        ctx.state = LaneChangeState::PreLaneChange;
                        ctx.ll_prob = 1.0;
                        ctx.wait_timer_s = 0.0;
                    }
                }
                LaneChangeState::PreLaneChange => {
                    ctx.wait_timer_s += DT;
                    ctx.direction = if inputs.left_blinker {
                        LaneChangeDirection::Left
                    } else if inputs.right_blinker {
                        LaneChangeDirection::Right
                    } else {
                        LaneChangeDirection::None
                    };

                    let torque_applied = inputs.steering_pressed
                        && ((inputs.steering_torque > 0.0 && ctx.direction == LaneChangeDirection::Left)
                            || (inputs.steering_torque < 0.0
                                && ctx.direction == LaneChangeDirection::Right));
                    let blindspot = (inputs.left_blindspot && ctx.direction == LaneChangeDirection::Left)
                        || (inputs.right_blindspot && ctx.direction == LaneChangeDirection::Right);

                    if !one_blinker || below_min_speed {
                        ctx.state = LaneChangeState::Off;
                    } else if !blindspot
                        && (torque_applied
                            || (config.auto_delay.seconds() > 0.0
                                && ctx.wait_timer_s > config.auto_delay.seconds()))
                    {
                        ctx.state = LaneChangeState::LaneChangeStarting;
                    }
                }
                LaneChangeState::LaneChangeStarting => {
                    let fade_rate =
                        linear_interp(inputs.v_ego, &LANE_CHANGE_FADE_SPEEDS, &LANE_CHANGE_FADE_RATES);
                    ctx.ll_prob = (ctx.ll_prob - fade_rate * DT).max(0.0);
                    if inputs.lane_change_prob < LANE_CHANGE_PROB_DONE
                        && ctx.ll_prob < LANE_CHANGE_LL_PROB_DONE
                    {
                        ctx.state = LaneChangeState::LaneChangeFinishing;
                    }
                }
                LaneChangeState::LaneChangeFinishing => {
                    ctx.ll_prob = (ctx.ll_prob + DT).min(1.0);
                    if ctx.ll_prob > LANE_CHANGE_LL_PROB_RESTORED {
                        ctx.state = if one_blinker {
                            LaneChangeState::PreLaneChange
                        } else {
                            LaneChangeState::Off
                        };
                    }
                }
            }
        }

        ctx.timer_s = match ctx.state {
            LaneChangeState::Off | LaneChangeState::PreLaneChange => 0.0,
            _ => ctx.timer_s + DT,
        };
        ctx.prev_one_blinker = one_blinker;

        debug!(
            state = ?ctx.state,
            direction = ?ctx.direction,
            ll_prob = ctx.ll_prob,
            "lane-change step"
        );
    }

    /// Current `Desire`, a pure function of `(state, direction)`.
    pub fn desire(&self) -> Desire {
        desire_for(self.context.state, self.context.direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs() -> LaneChangeInputs {
        LaneChangeInputs {
            active: true,
            v_ego: 20.0,
            steer_max_v: 1.0,
            ..Default::default()
        }
    }

    #[test]
    fn idle_at_rest_stays_off() {
        let mut sm = LaneChangeStateMachine::new();
        let mut step_inputs = inputs();
        step_inputs.active = false;
        step_inputs.v_ego = 0.0;
        sm.step(&step_inputs, &LaneChangeConfig::default());
        assert_eq!(sm.context.state, LaneChangeState::Off);
        assert_eq!(sm.desire(), Desire::None);
        assert_eq!(sm.context.timer_s, 0.0);
    }

    #[test]
    fn blinker_triggers_pre_lane_change() {
        let mut sm = LaneChangeStateMachine::new();
        let mut step_inputs = inputs();
        step_inputs.left_blinker = true;
        sm.step(&step_inputs, &LaneChangeConfig::default());
        assert_eq!(sm.context.state, LaneChangeState::PreLaneChange);
        assert_eq!(sm.context.direction, LaneChangeDirection::Left);
        assert_eq!(sm.context.ll_prob, 1.0);
        assert!((sm.context.wait_timer_s - 0.05).abs() < 1e-9);
    }

    #[test]
    fn auto_delay_elapses_into_starting_and_fades() {
        let mut sm = LaneChangeStateMachine::new();
        let config = LaneChangeConfig {
            auto_delay: crate::config::AutoDelay::Ms200,
            ..Default::default()
        };
        let mut step_inputs = inputs();
        step_inputs.left_blinker = true;
        sm.step(&step_inputs, &config);
        for _ in 0..5 {
            sm.step(&step_inputs, &config);
        }
        assert_eq!(sm.context.state, LaneChangeState::LaneChangeStarting);

        step_inputs.v_ego = 16.0;
        for _ in 0..10 {
            sm.step(&step_inputs, &config);
        }
        // fade rate at 16 m/s is 0.17/s; 10 steps * 0.05s = 0.5s of fading from 1.0.
        assert!((sm.context.ll_prob - 0.915).abs() < 1e-6);
    }

    #[test]
    fn blindspot_blocks_transition_out_of_pre() {
        let mut sm = LaneChangeStateMachine::new();
        let config = LaneChangeConfig::default();
        let mut step_inputs = inputs();
        step_inputs.left_blinker = true;
        step_inputs.left_blindspot = true;
        for _ in 0..20 {
            sm.step(&step_inputs, &config);
            assert_eq!(sm.context.state, LaneChangeState::PreLaneChange);
        }
    }

    #[test]
    fn off_reachable_from_every_state_when_inactive() {
        for start in [
            LaneChangeState::Off,
            LaneChangeState::PreLaneChange,
            LaneChangeState::LaneChangeStarting,
            LaneChangeState::LaneChangeFinishing,
        ] {
            let mut sm = LaneChangeStateMachine::new();
            sm.context.state = start;
            sm.context.timer_s = 11.0;
            let mut step_inputs = inputs();
            step_inputs.active = false;
            sm.step(&step_inputs, &LaneChangeConfig::default());
            assert_eq!(sm.context.state, LaneChangeState::Off);
        }
    }

    proptest::proptest! {
        #[test]
        fn ll_prob_stays_in_unit_range(
            left in proptest::bool::ANY,
            right in proptest::bool::ANY,
            v_ego in 0.0f64..40.0,
            lane_change_prob in 0.0f64..1.0,
            steps in 1usize..200,
        ) {
            let mut sm = LaneChangeStateMachine::new();
            let config = LaneChangeConfig::default();
            let mut step_inputs = inputs();
            step_inputs.left_blinker = left;
            step_inputs.right_blinker = right;
            step_inputs.v_ego = v_ego;
            step_inputs.lane_change_prob = lane_change_prob;
            for _ in 0..steps {
                sm.step(&step_inputs, &config);
                prop_assert!(sm.context.ll_prob >= 0.0 && sm.context.ll_prob <= 1.0);
            }
        }
    }
}
