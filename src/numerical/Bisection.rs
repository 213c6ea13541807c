//! Bisection root finding on a bracketing interval.
//!
//! Example#
//! ```
//! use RustedNumerics::numerical::Bisection::bisection;
//! use RustedNumerics::numerical::iteration_trace::ConvergenceConfig;
//! use RustedNumerics::symbolic::symbolic_engine::Expr;
//! let f = Expr::parse_expression("x^2 - 2").unwrap();
//! let config = ConvergenceConfig::new(1e-8, 100).unwrap();
//! let trace = bisection(&f, 1.0, 2.0, &config).unwrap();
//! println!("{}", trace.to_table());
//! let root = trace.ensure_converged().unwrap().p;
//! assert!((root - 2f64.sqrt()).abs() < 1e-8);
//! ```
use crate::errors::NumericalError;
use crate::numerical::iteration_trace::{
    ConvergenceConfig, DivergenceReason, IterationTrace, SolverState, TraceValue,
};
use crate::symbolic::symbolic_engine::Expr;
use crate::symbolic::symbolic_lambdify::ScalarFunction;
use log::{debug, info};

/// Bracket `[a, b]` and its midpoint `p` at one iteration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BisectionPoint {
    pub a: f64,
    pub b: f64,
    pub p: f64,
}

impl TraceValue for BisectionPoint {
    fn column_names(&self) -> Vec<String> {
        vec!["a".to_string(), "b".to_string(), "p".to_string()]
    }
    fn values(&self) -> Vec<f64> {
        vec![self.a, self.b, self.p]
    }
}

/// Bisection for `f(x) = 0` on `[a, b]` with `f(a)` and `f(b)` of opposite signs.
pub fn bisection(
    f: &Expr,
    a: f64,
    b: f64,
    config: &ConvergenceConfig,
) -> Result<IterationTrace<BisectionPoint>, NumericalError> {
    let fun = f.compile1D("x")?;
    bisection_fn(&fun, a, b, config)
}

/// Same as [`bisection`] for an already compiled function.
///
/// Record `k` holds the bracket before the split, the midpoint, `f(p)` and the error
/// `|b - a|/2`, which halves at every step. The run converges when the error is at most
/// the tolerance or `f(p)` is exactly zero, so it takes `ceil(log2((b - a)/tolerance))`
/// steps at most; otherwise it ends with
/// [`SolverState::IterationLimitReached`] and the last midpoint as best estimate.
pub fn bisection_fn(
    f: &ScalarFunction,
    a: f64,
    b: f64,
    config: &ConvergenceConfig,
) -> Result<IterationTrace<BisectionPoint>, NumericalError> {
    config.validate()?;
    if !(a.is_finite() && b.is_finite()) || a == b {
        return Err(NumericalError::Precondition(format!(
            "[{}, {}] is not a valid interval",
            a, b
        )));
    }
    let (mut a, mut b) = if a < b { (a, b) } else { (b, a) };
    let mut fa = f(a)?;
    let fb = f(b)?;
    if fa != 0.0 && fb != 0.0 && fa.signum() == fb.signum() {
        return Err(NumericalError::Precondition(format!(
            "f(a) = {} and f(b) = {} must have opposite signs",
            fa, fb
        )));
    }
    info!("bisection started on [{}, {}], tolerance {:e}", a, b, config.tolerance);
    let mut trace = IterationTrace::new("bisection");
    // an endpoint is already a root
    if fa == 0.0 || fb == 0.0 {
        let root = if fa == 0.0 { a } else { b };
        trace.push(BisectionPoint { a, b, p: root }, 0.0, 0.0);
        trace.finish(SolverState::Converged);
        return Ok(trace);
    }
    for _ in 0..config.max_iterations {
        let p = a + (b - a) / 2.0;
        let fp = match f(p) {
            Ok(value) => value,
            Err(err) => {
                trace.finish(SolverState::Diverged(DivergenceReason::Domain(err)));
                return Ok(trace);
            }
        };
        let error = (b - a).abs() / 2.0;
        debug!("bisection: a = {}, b = {}, p = {}, f(p) = {:e}, error = {:e}", a, b, p, fp, error);
        trace.push(BisectionPoint { a, b, p }, fp, error);
        if error <= config.tolerance || fp == 0.0 {
            trace.finish(SolverState::Converged);
            return Ok(trace);
        }
        if fa.signum() != fp.signum() {
            b = p;
        } else {
            a = p;
            fa = fp;
        }
    }
    trace.finish(SolverState::IterationLimitReached);
    Ok(trace)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn parse(formula: &str) -> Expr {
        Expr::parse_expression(formula).unwrap()
    }

    #[test]
    fn test_sqrt2() {
        let config = ConvergenceConfig::new(1e-10, 200).unwrap();
        let trace = bisection(&parse("x^2 - 2"), 0.0, 2.0, &config).unwrap();
        assert!(trace.is_converged());
        let root = trace.ensure_converged().unwrap().p;
        assert_relative_eq!(root, 2f64.sqrt(), epsilon = 1e-10);
    }

    #[test]
    fn test_error_halves_and_step_bound() {
        let (a0, b0) = (1.0, 3.0);
        let tol = 1e-6;
        let config = ConvergenceConfig::new(tol, 500).unwrap();
        let trace = bisection(&parse("cos(x)"), a0, b0, &config).unwrap();
        for record in trace.records() {
            let expected = (b0 - a0) / 2f64.powi(record.index as i32 + 1);
            assert_relative_eq!(record.error, expected, max_relative = 1e-12);
        }
        let bound = ((b0 - a0) / tol).log2().ceil() as usize;
        assert!(trace.len() <= bound);
        assert_relative_eq!(trace.solution().unwrap().p, std::f64::consts::FRAC_PI_2, epsilon = tol);
    }

    #[test]
    fn test_bracket_update() {
        let config = ConvergenceConfig::new(1e-3, 100).unwrap();
        let trace = bisection(&parse("x - 0.3"), 0.0, 1.0, &config).unwrap();
        let records = trace.records();
        assert_eq!(records[0].approximation, BisectionPoint { a: 0.0, b: 1.0, p: 0.5 });
        // f(0.5) > 0 so the root is in the left half
        assert_eq!(records[1].approximation, BisectionPoint { a: 0.0, b: 0.5, p: 0.25 });
        assert_eq!(records[2].approximation, BisectionPoint { a: 0.25, b: 0.5, p: 0.375 });
        assert_relative_eq!(records[0].residual, 0.2);
    }

    #[test]
    fn test_step_count_bound() {
        let f = parse("x - 0.3");
        // (b - a)/tolerance = 2^10 exactly, and 1000 which rounds up to the same bound
        for tolerance in [1.0 / 1024.0, 1e-3] {
            let config = ConvergenceConfig::new(tolerance, 100).unwrap();
            let trace = bisection(&f, 0.0, 1.0, &config).unwrap();
            assert!(trace.is_converged());
            assert_eq!(trace.len(), 10);
            for (k, record) in trace.records().iter().enumerate() {
                assert_eq!(record.error, 1.0 / 2f64.powi(k as i32 + 1));
            }
        }
    }

    #[test]
    fn test_preconditions() {
        let config = ConvergenceConfig::default();
        assert!(matches!(
            bisection(&parse("x^2 + 1"), -1.0, 1.0, &config),
            Err(NumericalError::Precondition(_))
        ));
        assert!(bisection(&parse("x"), 1.0, 1.0, &config).is_err());
        assert!(matches!(
            bisection(&parse("x + y"), -1.0, 1.0, &config),
            Err(NumericalError::Parse(_))
        ));
    }

    #[test]
    fn test_reversed_interval_exact_root_and_budget() {
        let config = ConvergenceConfig::new(1e-12, 100).unwrap();
        // midpoint hits the root exactly
        let trace = bisection(&parse("x - 1"), 2.0, 0.0, &config).unwrap();
        assert_eq!(trace.len(), 1);
        assert_eq!(trace.ensure_converged().unwrap().p, 1.0);
        // endpoint root
        let trace = bisection(&parse("x"), 0.0, 1.0, &config).unwrap();
        assert_eq!(trace.solution().unwrap().p, 0.0);

        let short = ConvergenceConfig::new(1e-12, 5).unwrap();
        let trace = bisection(&parse("x^3 - 2"), 0.0, 2.0, &short).unwrap();
        assert_eq!(trace.len(), 5);
        assert_eq!(trace.state(), &SolverState::IterationLimitReached);
        assert!(matches!(
            trace.ensure_converged(),
            Err(NumericalError::NonConvergence { iterations: 4, .. })
        ));
    }
}
