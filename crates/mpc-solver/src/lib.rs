//! Native MPC solver trait and reference implementation (spec.md §4.4 / C4).

pub mod constants;
mod solver;

pub use constants::{HEADING_COST, PATH_COST};
pub use solver::{MpcSolver, ReferenceMpcSolver};
