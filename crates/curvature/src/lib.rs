//! Delay-compensated curvature post-processing (spec.md §4.5 / C5).

mod postprocess;

pub use postprocess::{CurvatureLimiter, CurvatureOutput};
