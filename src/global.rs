//! numeric thresholds and defaults shared by all solvers

/// hard cap on iterations when the caller gives none
pub const DEFAULT_MAX_ITERATIONS: usize = 1000;
/// default stopping tolerance of the iterative methods
pub const DEFAULT_TOLERANCE: f64 = 1e-6;
/// |f'(x)| below this value stops scalar Newton-Raphson
pub const ZERO_DERIVATIVE_THRESHOLD: f64 = 1e-14;
/// pivots below this value (relative to the largest entry) mark a matrix as singular
pub const SINGULARITY_THRESHOLD: f64 = 1e-12;
/// condition numbers above this value are reported before Jacobi iterations
pub const CONDITION_NUMBER_THRESHOLD: f64 = 1e12;
/// interpolation coefficients below this magnitude are dropped
pub const THRESHOLD: f64 = 1e-14;
