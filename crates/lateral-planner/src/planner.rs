//! Top-level orchestrator (C6): wires the lane-line adapter, lane-change
//! state machine, mode arbiter, MPC driver, and curvature post-processor
//! into one `update` / `publish` pair.

use lane_change::{LaneChangeInputs, LaneChangeStateMachine};
use lane_lines::LaneLineAdapter;
use lateral_mpc::LateralMpcDriver;
use mode_arbiter::{ArbiterContext, ArbiterInputs, LanelessMode, ModeArbiter};
use mpc_solver::ReferenceMpcSolver;
use planner_types::constants::{CAR_ROTATION_RADIUS, DT, H, KPH_TO_MS, N, STEER_RATE_COST_SPEEDS};
use planner_types::{linear_interp, Desire, LateralPlan, LiveMpc, PathSource, PathXyz};

use crate::config::PlannerConfig;
use crate::inputs::PlannerInputs;

fn arc_length(path: &PathXyz) -> [f64; H] {
    let mut out = [0.0; H];
    for i in 0..H {
        out[i] = ((path.x[i] as f64).powi(2) + (path.y[i] as f64).powi(2) + (path.z[i] as f64).powi(2)).sqrt();
    }
    out
}

fn first_n_plus_one(values: &[f64; H]) -> [f64; N + 1] {
    let mut out = [0.0; N + 1];
    out.copy_from_slice(&values[..=N]);
    out
}

/// Owns every per-frame component and the state they carry across frames.
pub struct Planner {
    config: PlannerConfig,
    log_mpc: bool,

    lane_lines: LaneLineAdapter,
    lane_change: LaneChangeStateMachine,
    arbiter_context: ArbiterContext,
    arbiter: ModeArbiter,
    mpc: LateralMpcDriver<ReferenceMpcSolver>,
    curvature: curvature::CurvatureLimiter,

    param_poll_accum_s: f64,
    standstill_elapsed_time: f64,

    last_plan: LateralPlan,
    last_mpc_solution: planner_types::MpcSolution,
    last_y_pts: [f64; N + 1],
}

impl Planner {
    pub fn new(config: PlannerConfig) -> Self {
        let log_mpc = std::env::var("LOG_MPC").is_ok();
        Self {
            lane_lines: LaneLineAdapter::new(config.lane_lines),
            lane_change: LaneChangeStateMachine::new(),
            arbiter_context: ArbiterContext {
                use_lanelines: true,
                laneless_mode: LanelessMode::AlwaysLane,
                ..ArbiterContext::default()
            },
            arbiter: ModeArbiter::new(config.arbiter),
            mpc: LateralMpcDriver::new(ReferenceMpcSolver::new()),
            curvature: curvature::CurvatureLimiter::default(),
            param_poll_accum_s: 0.0,
            standstill_elapsed_time: 0.0,
            last_plan: empty_plan(),
            last_mpc_solution: planner_types::MpcSolution::default(),
            last_y_pts: [0.0; N + 1],
            config,
            log_mpc,
        }
    }

    /// Re-read the parameter store, if it's been at least
    /// `config.param_poll_interval_s` since the last poll.
    pub fn maybe_poll_params(&mut self, source: &dyn config_source::ConfigSource, defaults: config_source::LateralParams) {
        self.param_poll_accum_s += DT;
        if self.param_poll_accum_s <= self.config.param_poll_interval_s {
            return;
        }
        self.param_poll_accum_s = 0.0;

        let params = config_source::poll(source, defaults);
        self.arbiter_context.use_lanelines = params.use_lanelines;
        self.arbiter_context.laneless_mode = LanelessMode::from_index(params.laneless_mode);
        self.config.lane_change.min_speed_m_s = params.lane_change_speed_kph as f64 * KPH_TO_MS;
        self.config.lane_change.auto_delay =
            lane_change::AutoDelay::from_index(params.auto_lane_change_delay_index);
    }

    /// Advance every component by one frame.
    pub fn update(&mut self, inputs: &PlannerInputs) {
        let v_ego = inputs.car_state.v_ego as f64;
        let active = inputs.controls_state.active;
        let measured_curvature = inputs.controls_state.curvature as f64;
        let output_scale = inputs.controls_state.lateral_control_state.output() as f64;

        self.lane_lines.parse_model(&inputs.lanes, &inputs.model, inputs.car_state.v_ego);

        let path_xyz = model_path(&inputs.model);
        let t_idxs_f32 = inputs.model.t_idxs();
        let t_idxs: [f64; H] = {
            let mut out = [0.0; H];
            for i in 0..H {
                out[i] = t_idxs_f32[i] as f64;
            }
            out
        };
        let plan_yaw = inputs.model.yaw_path();

        let lane_change_inputs = LaneChangeInputs {
            active,
            v_ego,
            left_blinker: inputs.car_state.left_blinker,
            right_blinker: inputs.car_state.right_blinker,
            steering_pressed: inputs.car_state.steering_pressed,
            steering_torque: inputs.car_state.steering_torque as f64,
            left_blindspot: inputs.car_state.left_blindspot,
            right_blindspot: inputs.car_state.right_blindspot,
            output_scale,
            steer_max_v: self.config.car_params.steer_max_v,
            lane_change_prob: (self.lane_lines.l_lane_change_prob + self.lane_lines.r_lane_change_prob) as f64,
        };
        self.lane_change.step(&lane_change_inputs, &self.config.lane_change);
        let desire = self.lane_change.desire();

        let steer_rate_cost = linear_interp(
            v_ego,
            &STEER_RATE_COST_SPEEDS,
            &[1.0, 0.8, self.config.car_params.steer_rate_cost],
        );

        if matches!(desire, Desire::LaneChangeLeft | Desire::LaneChangeRight) {
            let ll_prob = self.lane_change.context.ll_prob as f32;
            self.lane_lines.lll_prob *= ll_prob;
            self.lane_lines.rll_prob *= ll_prob;
        }

        let arbiter_inputs = ArbiterInputs {
            v_ego,
            lll_prob: self.lane_lines.lll_prob as f64,
            rll_prob: self.lane_lines.rll_prob as f64,
            lead_d_rel: inputs.radar.lead_one.map(|l| l.d_rel as f64),
            lead_v_rel: inputs.radar.lead_one.map(|l| l.v_rel as f64),
            steering_angle_desired_deg: inputs.controls_state.steering_angle_desired_deg as f64,
            steering_angle_deg: inputs.car_state.steering_angle_deg as f64,
            lane_change_state: self.lane_change.context.state,
            path_y0: path_xyz.y[0] as f64,
            path_y0_std: inputs.model.y_std0() as f64,
        };
        let decision = self.arbiter.step(&mut self.arbiter_context, &arbiter_inputs);
        let mut weights = decision.weights;
        weights.steer_rate_cost = steer_rate_cost;

        let d_path_xyz = match decision.source {
            PathSource::Lane => self.lane_lines.get_d_path(&inputs.lanes, &t_idxs_f32, &path_xyz),
            PathSource::Laneless => path_xyz,
        };

        let d_path_arc = arc_length(&d_path_xyz);
        let path_arc = arc_length(&path_xyz);
        let d_path_y: Vec<f64> = d_path_xyz.y.iter().map(|&v| v as f64).collect();
        let plan_yaw_f64: Vec<f64> = plan_yaw.iter().map(|&v| v as f64).collect();
        let d_path_arc_v = d_path_arc.to_vec();
        let path_arc_v = path_arc.to_vec();

        let mut y_pts = [0.0; N + 1];
        let mut heading_pts = [0.0; N + 1];
        for i in 0..=N {
            let distance = v_ego * t_idxs[i];
            y_pts[i] = linear_interp(distance, &d_path_arc_v, &d_path_y);
            heading_pts[i] = linear_interp(distance, &path_arc_v, &plan_yaw_f64);
        }
        self.last_y_pts = y_pts;

        let t_idxs_n1 = first_n_plus_one(&t_idxs);
        let mpc_out = self.mpc.step(
            weights,
            v_ego,
            CAR_ROTATION_RADIUS,
            measured_curvature,
            &t_idxs_n1,
            &y_pts,
            &heading_pts,
        );
        self.last_mpc_solution = mpc_out.solution.clone();

        let delay = self.config.car_params.steer_actuator_delay;
        let current_curvature = mpc_out.solution.curvature[0];
        let psi_at_delay = linear_interp(delay, &t_idxs_n1, &mpc_out.solution.psi);
        let next_curvature_rate = mpc_out.solution.curvature_rate[0];
        let curvature_out = self.curvature.step(psi_at_delay, current_curvature, next_curvature_rate, v_ego, delay);

        if inputs.car_state.standstill {
            self.standstill_elapsed_time += DT;
        } else {
            self.standstill_elapsed_time = 0.0;
        }

        let valid = inputs.car_state.valid
            && inputs.car_state.alive
            && inputs.controls_state.valid
            && inputs.controls_state.alive
            && inputs.model.valid
            && inputs.model.alive;

        self.last_plan = LateralPlan {
            valid,
            lane_width: self.lane_lines.lane_width,
            d_path_points: y_pts.iter().map(|&v| v as f32).collect(),
            l_prob: self.lane_lines.lll_prob,
            r_prob: self.lane_lines.rll_prob,
            d_prob: self.lane_lines.d_prob,
            raw_curvature: curvature_out.raw_curvature,
            raw_curvature_rate: curvature_out.raw_curvature_rate,
            curvature: curvature_out.curvature,
            curvature_rate: curvature_out.curvature_rate,
            mpc_solution_valid: mpc_out.solution_valid,
            desire,
            lane_change_state: self.lane_change.context.state,
            lane_change_direction: self.lane_change.context.direction,
            steer_rate_cost,
            output_scale: output_scale as f32,
            v_cruise_set: inputs.controls_state.v_cruise_kph,
            v_curvature: inputs.controls_state.curvature,
            steer_angle_desire_deg: inputs.controls_state.steering_angle_desired_deg,
            laneless_mode: decision.laneless_status,
            steer_actuator_delay: delay,
            standstill_elapsed_time: self.standstill_elapsed_time,
        };
    }

    /// The frame ready to send downstream.
    pub fn publish(&self) -> LateralPlan {
        self.last_plan.clone()
    }

    /// Debug frame, only meaningful when `LOG_MPC` was set at construction.
    pub fn live_mpc(&self) -> Option<LiveMpc> {
        if !self.log_mpc {
            return None;
        }
        Some(LiveMpc {
            x: self.last_mpc_solution.x,
            y: self.last_mpc_solution.y,
            psi: self.last_mpc_solution.psi,
            curvature: self.last_mpc_solution.curvature,
            cost: self.last_mpc_solution.cost,
        })
    }
}

fn model_path(model: &planner_types::ModelV2Frame) -> PathXyz {
    let mut out = PathXyz::default();
    for i in 0..H {
        out.x[i] = model.position[i].x;
        out.y[i] = model.position[i].y;
        out.z[i] = model.position[i].z;
    }
    out
}

fn empty_plan() -> LateralPlan {
    LateralPlan {
        valid: false,
        lane_width: 0.0,
        d_path_points: vec![0.0; N + 1],
        l_prob: 0.0,
        r_prob: 0.0,
        d_prob: 0.0,
        raw_curvature: 0.0,
        raw_curvature_rate: 0.0,
        curvature: 0.0,
        curvature_rate: 0.0,
        mpc_solution_valid: true,
        desire: Desire::None,
        lane_change_state: planner_types::LaneChangeState::Off,
        lane_change_direction: planner_types::LaneChangeDirection::None,
        steer_rate_cost: 0.0,
        output_scale: 0.0,
        v_cruise_set: 0.0,
        v_curvature: 0.0,
        steer_angle_desire_deg: 0.0,
        laneless_mode: false,
        steer_actuator_delay: 0.0,
        standstill_elapsed_time: 0.0,
    }
}
