//! Taylor polynomials with approximation error.
//!
//! Example#
//! ```
//! use RustedNumerics::numerical::Taylor::{taylor, taylor_report};
//! use RustedNumerics::symbolic::symbolic_engine::Expr;
//! let f = Expr::parse_expression("exp(x)").unwrap();
//! let t = taylor(&f, 0.0, 3).unwrap();
//! println!("{}", t); // 1 + x + 0.5*x^2 + 0.16666666666666666*x^3
//! let report = taylor_report(&f, 0.0, 3, 0.5).unwrap();
//! assert!(report.absolute_error < 3e-3);
//! ```
use crate::errors::NumericalError;
use crate::symbolic::polynomial::Polynomial;
use crate::symbolic::symbolic_engine::Expr;
use crate::symbolic::utils::factorial;
use log::{debug, info};
use std::fmt;
use tabled::{builder::Builder, settings::Style};

/// Degree-`n` Taylor polynomial of `f(x)` around `x0`.
pub fn taylor(f: &Expr, x0: f64, n: usize) -> Result<Polynomial, NumericalError> {
    taylor_in(f, "x", x0, n)
}

/// Degree-`n` Taylor polynomial in an arbitrary variable.
///
/// Sums `f^(i)(x0)/i! * (var - x0)^i` for `i = 0..=n`, so the result matches `f` and its
/// first `n` derivatives at `x0`.
pub fn taylor_in(f: &Expr, var: &str, x0: f64, n: usize) -> Result<Polynomial, NumericalError> {
    info!("Taylor expansion of {} around {} = {}, degree {}", f, var, x0, n);
    let mut coefficients = Vec::with_capacity(n + 1);
    let mut derivative = f.clone();
    for i in 0..=n {
        if i > 0 {
            derivative = derivative.diff(var).simplify();
        }
        let value = derivative.eval_expression(&[var], &[x0])?;
        debug!("d^{}f/d{}^{} = {}, value {}", i, var, i, derivative, value);
        coefficients.push(value / factorial(i));
    }
    Ok(Polynomial::new(coefficients, x0, var))
}

/// `|f(x) - t(x)|`
pub fn absolute_error(f: &Expr, t: &Polynomial, x: f64) -> Result<f64, NumericalError> {
    let exact = f.eval_expression(&[t.variable()], &[x])?;
    Ok((exact - t.eval(x)).abs())
}

/// `|f(x) - t(x)| / |f(x)|`, `+inf` when `f(x) == 0` (relative error undefined)
pub fn relative_error(f: &Expr, t: &Polynomial, x: f64) -> Result<f64, NumericalError> {
    let exact = f.eval_expression(&[t.variable()], &[x])?;
    if exact == 0.0 {
        return Ok(f64::INFINITY);
    }
    Ok((exact - t.eval(x)).abs() / exact.abs())
}

/// Polynomial plus its quality at one query point.
#[derive(Clone, Debug)]
pub struct TaylorReport {
    pub polynomial: Polynomial,
    pub x: f64,
    pub exact: f64,
    pub approximation: f64,
    pub absolute_error: f64,
    /// `+inf` marks an undefined relative error
    pub relative_error: f64,
}

pub fn taylor_report(f: &Expr, x0: f64, n: usize, x: f64) -> Result<TaylorReport, NumericalError> {
    let polynomial = taylor(f, x0, n)?;
    let exact = f.eval_expression(&["x"], &[x])?;
    let approximation = polynomial.eval(x);
    let report = TaylorReport {
        absolute_error: absolute_error(f, &polynomial, x)?,
        relative_error: relative_error(f, &polynomial, x)?,
        polynomial,
        x,
        exact,
        approximation,
    };
    info!("{}", report);
    Ok(report)
}

impl TaylorReport {
    pub fn to_table(&self) -> String {
        let relative = if self.relative_error.is_infinite() {
            "undefined".to_string()
        } else {
            format!("{:e}", self.relative_error)
        };
        let mut builder = Builder::default();
        builder.push_record(["polynomial".to_string(), self.polynomial.to_string()]);
        builder.push_record(["x".to_string(), self.x.to_string()]);
        builder.push_record(["f(x)".to_string(), self.exact.to_string()]);
        builder.push_record(["t(x)".to_string(), self.approximation.to_string()]);
        builder.push_record(["absolute error".to_string(), format!("{:e}", self.absolute_error)]);
        builder.push_record(["relative error".to_string(), relative]);
        let mut table = builder.build();
        table.with(Style::modern_rounded());
        table.to_string()
    }
}

impl fmt::Display for TaylorReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "t(x) = {}; at x = {}: f = {}, t = {}, absolute error = {:e}, relative error = {:e}",
            self.polynomial,
            self.x,
            self.exact,
            self.approximation,
            self.absolute_error,
            self.relative_error
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn parse(formula: &str) -> Expr {
        Expr::parse_expression(formula).unwrap()
    }

    #[test]
    fn test_exp_coefficients() {
        let t = taylor(&parse("exp(x)"), 0.0, 4).unwrap();
        let expected = [1.0, 1.0, 0.5, 1.0 / 6.0, 1.0 / 24.0];
        assert_eq!(t.coefficients().len(), 5);
        for (c, e) in t.coefficients().iter().zip(expected.iter()) {
            assert_relative_eq!(*c, *e, epsilon = 1e-15);
        }
        assert_eq!(t.degree(), 4);
    }

    #[test]
    fn test_degree_n_term_is_included() {
        // a cubic is reproduced exactly by its degree-3 expansion
        let f = parse("x^3 - 2*x + 5");
        let t = taylor(&f, 1.0, 3).unwrap();
        for x in [-2.0, 0.0, 3.5] {
            assert_relative_eq!(t.eval(x), f.eval_expression(&["x"], &[x]).unwrap(), epsilon = 1e-10);
        }
        assert_eq!(t.degree(), 3);
    }

    #[test]
    fn test_derivatives_agree_at_center() {
        let cases = [("sin(x)*exp(x)", 0.3, 4), ("ln(1 + x)", 0.5, 5), ("1/(2 - x)", 1.0, 3)];
        for (formula, x0, n) in cases {
            let f = parse(formula);
            let t = taylor(&f, x0, n).unwrap().to_expr();
            for k in 0..=n {
                let df = f.diff_n("x", k).eval_expression(&["x"], &[x0]).unwrap();
                let dt = t.diff_n("x", k).eval_expression(&["x"], &[x0]).unwrap();
                assert_relative_eq!(df, dt, epsilon = 1e-9, max_relative = 1e-9);
            }
        }
    }

    #[test]
    fn test_errors() {
        let f = parse("cos(x)");
        let t = taylor(&f, 0.0, 2).unwrap();
        let x: f64 = 0.2;
        let abs = absolute_error(&f, &t, x).unwrap();
        assert_relative_eq!(abs, (x.cos() - (1.0 - x * x / 2.0)).abs(), epsilon = 1e-15);
        assert_relative_eq!(relative_error(&f, &t, x).unwrap(), abs / x.cos());

        // f(x) = 0 makes the relative error undefined
        let g = parse("sin(x)");
        let tg = taylor(&g, 1.0, 2).unwrap();
        assert!(relative_error(&g, &tg, 0.0).unwrap().is_infinite());
    }

    #[test]
    fn test_report_and_domain_error() {
        let report = taylor_report(&parse("exp(x)"), 0.0, 3, 0.5).unwrap();
        assert_relative_eq!(report.exact, 0.5f64.exp());
        let table = report.to_table();
        // rows keep their order from one call to the next
        let labels = ["polynomial", "f(x)", "t(x)", "absolute error", "relative error"];
        let positions: Vec<usize> = labels.iter().map(|l| table.find(l).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(table, report.to_table());
        // ln is undefined at the expansion point
        assert!(matches!(
            taylor(&parse("ln(x)"), 0.0, 2),
            Err(NumericalError::Domain(_))
        ));
    }
}
