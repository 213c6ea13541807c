//! Jacobi fixed-point iteration for dense linear systems `A x = b`.
//!
//! Every component of the new iterate is computed from the previous iterate only.
//! Diagonal dominance guarantees convergence but is not required: a matrix without it
//! is solved anyway and a warning is logged.
//!
//! Example#
//! ```
//! use RustedNumerics::numerical::Jacobi::jacobi;
//! use RustedNumerics::numerical::iteration_trace::ConvergenceConfig;
//! use nalgebra::{DMatrix, DVector};
//! let A = DMatrix::from_row_slice(2, 2, &[4.0, 1.0, 1.0, 3.0]);
//! let b = DVector::from_vec(vec![1.0, 2.0]);
//! let trace = jacobi(&A, &b, &ConvergenceConfig::new(1e-10, 100).unwrap()).unwrap();
//! let x = trace.ensure_converged().unwrap();
//! assert!((x[0] - 1.0 / 11.0).abs() < 1e-9);
//! ```
use crate::errors::NumericalError;
use crate::global::CONDITION_NUMBER_THRESHOLD;
use crate::numerical::iteration_trace::{
    ConvergenceConfig, DivergenceReason, IterationTrace, SolverState,
};
use crate::somelinalg::linear_sys_diagnostics::{
    DiagonalDominance, check_square_system, diagonal_dominance, poorly_conditioned,
    zero_diagonal_entry,
};
use log::{debug, info, warn};
use nalgebra::{DMatrix, DVector};

/// Jacobi iterations from the zero vector.
pub fn jacobi(
    A: &DMatrix<f64>,
    b: &DVector<f64>,
    config: &ConvergenceConfig,
) -> Result<IterationTrace<DVector<f64>>, NumericalError> {
    jacobi_with_guess(A, b, &DVector::zeros(b.len()), config)
}

/// Jacobi iterations from an explicit initial guess.
///
/// Converges when the infinity norm of the difference of successive iterates is below
/// the tolerance. Records carry the residual `||b - A x||_inf`. Exhausting
/// `max_iterations` is not an error: the trace ends in
/// [`SolverState::IterationLimitReached`].
pub fn jacobi_with_guess(
    A: &DMatrix<f64>,
    b: &DVector<f64>,
    x0: &DVector<f64>,
    config: &ConvergenceConfig,
) -> Result<IterationTrace<DVector<f64>>, NumericalError> {
    config.validate()?;
    check_square_system(A, b)?;
    if x0.len() != b.len() {
        return Err(NumericalError::Precondition(format!(
            "initial guess has {} entries, system has {}",
            x0.len(),
            b.len()
        )));
    }
    if let Some(i) = zero_diagonal_entry(A) {
        return Err(NumericalError::Precondition(format!(
            "diagonal entry A[{}][{}] is zero",
            i, i
        )));
    }
    match diagonal_dominance(A) {
        DiagonalDominance::Strict => {}
        dominance => warn!(
            "matrix is not strictly diagonally dominant ({:?}), Jacobi may not converge",
            dominance
        ),
    }
    // warns, the iterations still run
    poorly_conditioned(A, CONDITION_NUMBER_THRESHOLD);
    info!("Jacobi iterations for {}x{} system", b.len(), b.len());
    let n = b.len();
    let diagonal = A.diagonal();
    let mut trace = IterationTrace::new("Jacobi");
    let mut x = x0.clone();
    trace.push(x.clone(), (b - A * &x).amax(), f64::INFINITY);
    for k in 1..=config.max_iterations {
        // x_i = (b_i - sum_{j != i} A_ij x_j) / A_ii, from the previous iterate only
        let x_new = DVector::from_fn(n, |i, _| {
            let off_diagonal: f64 = (0..n).filter(|&j| j != i).map(|j| A[(i, j)] * x[j]).sum();
            (b[i] - off_diagonal) / diagonal[i]
        });
        if x_new.iter().any(|v| !v.is_finite()) {
            trace.finish(SolverState::Diverged(DivergenceReason::NonFiniteIterate));
            return Ok(trace);
        }
        let error = (&x_new - &x).amax();
        let residual = (b - A * &x_new).amax();
        debug!("iteration = {}, error = {:e}, residual = {:e}", k, error, residual);
        trace.push(x_new.clone(), residual, error);
        x = x_new;
        if error < config.tolerance {
            trace.finish(SolverState::Converged);
            return Ok(trace);
        }
    }
    trace.finish(SolverState::IterationLimitReached);
    Ok(trace)
}
