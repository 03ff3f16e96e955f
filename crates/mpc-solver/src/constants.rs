//! Cost scale factors "provided by the solver library's headers" (spec.md §6).

/// Base path-tracking cost scale factor.
pub const PATH_COST: f64 = 1.0;
/// Base heading-tracking cost scale factor.
pub const HEADING_COST: f64 = 1.0;
