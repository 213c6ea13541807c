//! Finite-difference solver for linear second-order boundary value problems
//! ```text
//! y'' = p(x) y' + q(x) y + r(x),   a <= x <= b,   y(a) = ya,   y(b) = yb
//! ```
//! The interval is split into `n + 1` steps of size `h = (b - a)/(n + 1)`. Central
//! differences at the interior points `x_1..x_n` give the tridiagonal system
//! ```text
//! (1 + h/2 p_i) y_{i-1} + (-2 - h^2 q_i) y_i + (1 - h/2 p_i) y_{i+1} = h^2 r_i
//! ```
//! with the known boundary values moved to the right-hand side of the first and last rows.
//! An equation written as `y'' + P y' + Q y = R` is solved with `p = -P`, `q = -Q`, `r = R`.
//!
//! Example#
//! ```
//! use RustedNumerics::numerical::BVP_finite_diff::{BVPProblem, finite_differences};
//! // y'' = -y, y(0) = 0, y(pi/2) = 1, exact solution sin(x)
//! let problem = BVPProblem::from_formulas("0", "-1", "0", (0.0, 0.0), (std::f64::consts::FRAC_PI_2, 1.0)).unwrap();
//! let solution = finite_differences(&problem, 50).unwrap();
//! println!("{}", solution.to_table());
//! assert!((solution.y[26] - solution.x[26].sin()).abs() < 1e-4);
//! ```
use crate::errors::{DomainError, NumericalError};
use crate::somelinalg::tridiagonal::Tridiagonal;
use crate::symbolic::parse_expr::parse_with_variables;
use crate::symbolic::symbolic_lambdify::ScalarFunction;
use log::{debug, info};
use nalgebra::DVector;
use tabled::{builder::Builder, settings::Style};

/// Coefficients `p, q, r` and the two boundary conditions.
pub struct BVPProblem {
    p: ScalarFunction,
    q: ScalarFunction,
    r: ScalarFunction,
    pub a: f64,
    pub ya: f64,
    pub b: f64,
    pub yb: f64,
}

impl BVPProblem {
    /// `left = (a, y(a))`, `right = (b, y(b))` with `a < b`.
    pub fn new(
        p: ScalarFunction,
        q: ScalarFunction,
        r: ScalarFunction,
        left: (f64, f64),
        right: (f64, f64),
    ) -> Result<Self, NumericalError> {
        let ((a, ya), (b, yb)) = (left, right);
        if ![a, ya, b, yb].iter().all(|v| v.is_finite()) {
            return Err(NumericalError::Precondition(
                "boundary points and values must be finite".to_string(),
            ));
        }
        if a >= b {
            return Err(NumericalError::Precondition(format!(
                "boundary points must satisfy a < b, got a = {}, b = {}",
                a, b
            )));
        }
        Ok(Self { p, q, r, a, ya, b, yb })
    }

    /// Coefficients given as plain closures.
    pub fn from_closures<P, Q, R>(p: P, q: Q, r: R, left: (f64, f64), right: (f64, f64)) -> Result<Self, NumericalError>
    where
        P: Fn(f64) -> f64 + Send + Sync + 'static,
        Q: Fn(f64) -> f64 + Send + Sync + 'static,
        R: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        Self::new(
            Box::new(move |x: f64| -> Result<f64, DomainError> { Ok(p(x)) }),
            Box::new(move |x: f64| -> Result<f64, DomainError> { Ok(q(x)) }),
            Box::new(move |x: f64| -> Result<f64, DomainError> { Ok(r(x)) }),
            left,
            right,
        )
    }

    /// Coefficients given as formulas in `x`.
    pub fn from_formulas(p: &str, q: &str, r: &str, left: (f64, f64), right: (f64, f64)) -> Result<Self, NumericalError> {
        let compile = |formula: &str| -> Result<ScalarFunction, NumericalError> {
            Ok(parse_with_variables(formula, &["x"])?.compile1D("x")?)
        };
        Self::new(compile(p)?, compile(q)?, compile(r)?, left, right)
    }

    fn coefficients(&self, x: f64) -> Result<(f64, f64, f64), DomainError> {
        Ok(((self.p)(x)?, (self.q)(x)?, (self.r)(x)?))
    }
}

/// Grid and approximate solution, boundary points included.
#[derive(Clone, Debug, PartialEq)]
pub struct BVPSolution {
    pub x: DVector<f64>,
    pub y: DVector<f64>,
}

impl BVPSolution {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// largest deviation from a known exact solution on the grid
    pub fn max_error<F: Fn(f64) -> f64>(&self, exact: F) -> f64 {
        self.x
            .iter()
            .zip(self.y.iter())
            .fold(0.0, |acc, (x, y)| f64::max(acc, (y - exact(*x)).abs()))
    }

    pub fn to_table(&self) -> String {
        let mut builder = Builder::default();
        builder.push_record(["i".to_string(), "x".to_string(), "y".to_string()]);
        for (i, (x, y)) in self.x.iter().zip(self.y.iter()).enumerate() {
            builder.push_record([i.to_string(), format!("{:.6}", x), format!("{:.10}", y)]);
        }
        let mut table = builder.build();
        table.with(Style::modern_rounded());
        table.to_string()
    }
}

/// Solves the problem on `n` interior points and returns `n + 2` grid values.
pub fn finite_differences(problem: &BVPProblem, n: usize) -> Result<BVPSolution, NumericalError> {
    let (a, b) = (problem.a, problem.b);
    let h = (b - a) / (n as f64 + 1.0);
    info!("finite differences on [{}, {}] with {} interior points, h = {}", a, b, n, h);
    let x = DVector::from_fn(n + 2, |i, _| if i == n + 1 { b } else { a + i as f64 * h });
    if n == 0 {
        return Ok(BVPSolution {
            x,
            y: DVector::from_vec(vec![problem.ya, problem.yb]),
        });
    }
    let mut lower = Vec::with_capacity(n - 1);
    let mut diag = Vec::with_capacity(n);
    let mut upper = Vec::with_capacity(n - 1);
    let mut rhs = DVector::zeros(n);
    for i in 1..=n {
        let xi = x[i];
        let (p, q, r) = problem.coefficients(xi)?;
        let sub = 1.0 + h / 2.0 * p;
        let sup = 1.0 - h / 2.0 * p;
        if i > 1 {
            lower.push(sub);
        }
        diag.push(-2.0 - h * h * q);
        if i < n {
            upper.push(sup);
        }
        rhs[i - 1] = h * h * r;
        // boundary values are known, each row folds in its own coefficient
        if i == 1 {
            rhs[0] -= sub * problem.ya;
        }
        if i == n {
            rhs[n - 1] -= sup * problem.yb;
        }
    }
    debug!("tridiagonal system: lower {:?}, diag {:?}, upper {:?}", lower, diag, upper);
    let system = Tridiagonal::new(lower, diag, upper)?;
    let interior = system.solve(&rhs)?;
    let mut y = DVector::zeros(n + 2);
    y[0] = problem.ya;
    y.rows_mut(1, n).copy_from(&interior);
    y[n + 1] = problem.yb;
    Ok(BVPSolution { x, y })
}
