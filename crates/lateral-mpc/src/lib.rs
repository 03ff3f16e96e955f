//! MPC driver: warm-starts the native solver, reseeds curvature between
//! frames, and latches solution validity (spec.md §4.4 / C4).

mod driver;

pub use driver::{LateralMpcDriver, MpcOutput};
