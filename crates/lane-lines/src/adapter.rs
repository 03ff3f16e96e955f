//! Lane-line model adapter (C1).

use planner_types::{linear_interp, LaneLineFrame, ModelV2Frame, PathXyz, H};
use tracing::debug;

use crate::config::LaneLinesConfig;

fn lowpass(prev: f32, raw: f32, rate: f32) -> f32 {
    prev + rate * (raw - prev)
}

/// Parses vision frames into usable lane-line confidences and a blended
/// driving path. Holds state across frames (`lane_width`, `d_prob`, the
/// smoothed per-side probabilities) the way the rest of the planner expects
/// a component to own its history rather than recompute it from scratch.
pub struct LaneLineAdapter {
    config: LaneLinesConfig,

    /// Smoothed left-line probability, usable by the arbiter.
    pub lll_prob: f32,
    /// Smoothed right-line probability.
    pub rll_prob: f32,
    /// Raw "line disappearing soon" hint, left side.
    pub l_lane_change_prob: f32,
    /// Raw "line disappearing soon" hint, right side.
    pub r_lane_change_prob: f32,
    /// Low-passed lane width estimate, meters.
    pub lane_width: f32,
    /// Confidence a driving path can be synthesized from the lane lines.
    pub d_prob: f32,
}

impl LaneLineAdapter {
    pub fn new(config: LaneLinesConfig) -> Self {
        Self {
            lane_width: config.default_lane_width,
            config,
            lll_prob: 0.0,
            rll_prob: 0.0,
            l_lane_change_prob: 0.0,
            r_lane_change_prob: 0.0,
            d_prob: 0.0,
        }
    }

    /// Ingest one vision frame. Updates `lll_prob`/`rll_prob`/`lane_width`/`d_prob`.
    pub fn parse_model(&mut self, lanes: &LaneLineFrame, _model: &ModelV2Frame, _v_ego: f32) {
        let rate = self.config.prob_lowpass_rate;
        self.lll_prob = lowpass(self.lll_prob, lanes.left.prob, rate);
        self.rll_prob = lowpass(self.rll_prob, lanes.right.prob, rate);
        self.l_lane_change_prob = lanes.left.lane_change_prob;
        self.r_lane_change_prob = lanes.right.lane_change_prob;

        if let (Some(&(lx, ly)), Some(&(rx, ry))) =
            (lanes.left.points.first(), lanes.right.points.first())
        {
            let _ = (lx, rx);
            let measured_width = (ry - ly).abs();
            if measured_width < self.config.max_plausible_lane_width
                && lanes.left.prob > 0.5
                && lanes.right.prob > 0.5
            {
                self.lane_width = lowpass(
                    self.lane_width,
                    measured_width,
                    self.config.lane_width_lowpass_rate,
                );
            }
        }

        let width_consistency = if let (Some(&(_, ly)), Some(&(_, ry))) =
            (lanes.left.points.first(), lanes.right.points.first())
        {
            let measured_width = (ry - ly).abs();
            let err = (measured_width - self.lane_width).abs() / self.lane_width.max(0.1);
            (1.0 - err).clamp(0.0, 1.0)
        } else {
            0.0
        };

        let target_d_prob = self.lll_prob.min(self.rll_prob) * width_consistency;
        self.d_prob = lowpass(self.d_prob, target_d_prob, rate);

        debug!(
            lll_prob = self.lll_prob,
            rll_prob = self.rll_prob,
            lane_width = self.lane_width,
            d_prob = self.d_prob,
            "lane-line frame parsed"
        );
    }

    /// Blend the lane-centered line with the raw model path, weighted by `d_prob`.
    pub fn get_d_path(
        &self,
        lanes: &LaneLineFrame,
        t_idxs: &[f32; H],
        model_path: &PathXyz,
    ) -> PathXyz {
        let mut out = *model_path;

        let left_pts = &lanes.left.points;
        let right_pts = &lanes.right.points;
        if left_pts.len() < 2 || right_pts.len() < 2 {
            return out;
        }

        let (left_x, left_y): (Vec<f64>, Vec<f64>) = left_pts
            .iter()
            .map(|&(x, y)| (x as f64, y as f64))
            .unzip();
        let (right_x, right_y): (Vec<f64>, Vec<f64>) = right_pts
            .iter()
            .map(|&(x, y)| (x as f64, y as f64))
            .unzip();

        for i in 0..H {
            let x = model_path.x[i] as f64;
            let ly = linear_interp(x, &left_x, &left_y);
            let ry = linear_interp(x, &right_x, &right_y);
            let lane_center_y = (ly + ry) / 2.0;
            let blended = self.d_prob as f64 * lane_center_y + (1.0 - self.d_prob as f64) * model_path.y[i] as f64;
            out.y[i] = blended as f32;
        }

        let _ = t_idxs;
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planner_types::{LaneLineSide, TrajectorySample};

    fn frame_with(points: Vec<(f32, f32)>, prob: f32) -> LaneLineSide {
        LaneLineSide {
            prob,
            points,
            lane_change_prob: 0.0,
        }
    }

    #[test]
    fn probabilities_lowpass_towards_raw() {
        let mut adapter = LaneLineAdapter::new(LaneLinesConfig::default());
        let lanes = LaneLineFrame {
            left: frame_with(vec![(0.0, 1.85), (30.0, 1.85)], 0.9),
            right: frame_with(vec![(0.0, -1.85), (30.0, -1.85)], 0.9),
        };
        let model = ModelV2Frame::default();
        for _ in 0..50 {
            adapter.parse_model(&lanes, &model, 20.0);
        }
        assert!(adapter.lll_prob > 0.85);
        assert!(adapter.rll_prob > 0.85);
        assert!((adapter.lane_width - 3.7).abs() < 0.5);
    }

    #[test]
    fn d_path_blends_towards_lane_center_as_d_prob_rises() {
        let mut adapter = LaneLineAdapter::new(LaneLinesConfig::default());
        let lanes = LaneLineFrame {
            left: frame_with(vec![(0.0, 1.85), (30.0, 1.85)], 0.95),
            right: frame_with(vec![(0.0, -1.85), (30.0, -1.85)], 0.95),
        };
        let model = ModelV2Frame::default();
        for _ in 0..200 {
            adapter.parse_model(&lanes, &model, 20.0);
        }
        assert!(adapter.d_prob > 0.8);

        let mut model_path = planner_types::PathXyz::default();
        for i in 0..H {
            model_path.x[i] = i as f32;
            model_path.y[i] = 5.0; // far from lane center
        }
        let t_idxs = [0.0f32; H];
        let d_path = adapter.get_d_path(&lanes, &t_idxs, &model_path);
        // Lane center is ~0.0, model says 5.0; with high d_prob the blend should move towards 0.
        assert!(d_path.y[0].abs() < model_path.y[0].abs());
        let _ = TrajectorySample::default();
    }
}
