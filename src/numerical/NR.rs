//! Newton-Raphson method for a scalar equation `f(x) = 0`.
//!
//! Example#
//! ```
//! use RustedNumerics::numerical::NR::newton_raphson;
//! use RustedNumerics::numerical::iteration_trace::ConvergenceConfig;
//! use RustedNumerics::symbolic::symbolic_engine::Expr;
//! let f = Expr::parse_expression("x^2 - 2").unwrap();
//! let config = ConvergenceConfig::default().with_tolerance(1e-10);
//! let trace = newton_raphson(&f, 1.0, &config).unwrap();
//! println!("{}", trace.to_table());
//! let root = *trace.ensure_converged().unwrap();
//! assert!((root - 2f64.sqrt()).abs() < 1e-10);
//! ```
use crate::errors::NumericalError;
use crate::global::ZERO_DERIVATIVE_THRESHOLD;
use crate::numerical::iteration_trace::{
    ConvergenceConfig, DivergenceReason, IterationTrace, SolverState,
};
use crate::symbolic::symbolic_engine::Expr;
use crate::symbolic::symbolic_lambdify::ScalarFunction;
use log::{debug, info, warn};

/// Newton-Raphson iterations for `f(x) = 0` in the variable `x`, starting at `x0`.
///
/// The derivative is computed symbolically once. The run converges when `|f(x_k)|` drops
/// below the tolerance. A near-zero derivative or reaching `max_iterations` ends it with
/// [`SolverState::Diverged`]. The trace starts with `x0`.
pub fn newton_raphson(
    f: &Expr,
    x0: f64,
    config: &ConvergenceConfig,
) -> Result<IterationTrace<f64>, NumericalError> {
    let df = f.diff("x").simplify();
    info!("Newton-Raphson: f(x) = {}, f'(x) = {}", f, df);
    let fun = f.compile1D("x")?;
    let dfun = df.compile1D("x")?;
    newton_raphson_fn(&fun, &dfun, x0, config)
}

/// Same iterations for compiled `f` and `f'`.
pub fn newton_raphson_fn(
    f: &ScalarFunction,
    df: &ScalarFunction,
    x0: f64,
    config: &ConvergenceConfig,
) -> Result<IterationTrace<f64>, NumericalError> {
    config.validate()?;
    if !x0.is_finite() {
        return Err(NumericalError::Precondition(format!(
            "initial guess {} is not finite",
            x0
        )));
    }
    let mut trace = IterationTrace::new("Newton-Raphson");
    let mut x = x0;
    let mut fx = f(x)?;
    trace.push(x, fx, f64::INFINITY);
    let mut iteration = 0;
    let state = loop {
        if fx.abs() < config.tolerance {
            break SolverState::Converged;
        }
        if iteration == config.max_iterations {
            break SolverState::Diverged(DivergenceReason::IterationCap {
                iterations: iteration,
            });
        }
        let dfx = match df(x) {
            Ok(value) => value,
            Err(err) => break SolverState::Diverged(DivergenceReason::Domain(err)),
        };
        if dfx.abs() < ZERO_DERIVATIVE_THRESHOLD {
            warn!("derivative vanishes at x = {}", x);
            break SolverState::Diverged(DivergenceReason::ZeroDerivative { x, derivative: dfx });
        }
        let x_new = x - fx / dfx;
        if !x_new.is_finite() {
            break SolverState::Diverged(DivergenceReason::NonFiniteIterate);
        }
        fx = match f(x_new) {
            Ok(value) => value,
            Err(err) => break SolverState::Diverged(DivergenceReason::Domain(err)),
        };
        iteration += 1;
        let error = (x_new - x).abs();
        debug!("iteration = {}, x = {}, f(x) = {:e}, step = {:e}", iteration, x_new, fx, error);
        trace.push(x_new, fx, error);
        x = x_new;
    };
    trace.finish(state);
    Ok(trace)
}
