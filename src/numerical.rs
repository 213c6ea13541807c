/// records, states and stopping rules shared by the iterative methods
pub mod iteration_trace;
/// Taylor polynomials and their approximation error
pub mod Taylor;
/// bisection root finding on a bracketing interval
pub mod Bisection;
///  Example#
/// ```
/// use RustedNumerics::numerical::NR::newton_raphson;
/// use RustedNumerics::numerical::iteration_trace::ConvergenceConfig;
/// use RustedNumerics::symbolic::symbolic_engine::Expr;
/// let f = Expr::parse_expression("x^2 - 2").unwrap();
/// let config = ConvergenceConfig::new(1e-10, 100).unwrap();
/// let trace = newton_raphson(&f, 1.0, &config).unwrap();
/// println!("{}", trace.to_table());
/// assert!((trace.ensure_converged().unwrap() - 2f64.sqrt()).abs() < 1e-10);
/// ```
pub mod NR;
/// Newton-Raphson for systems of nonlinear equations with a symbolic Jacobian
pub mod NR_system;
/// Jacobi iterations for linear systems
pub mod Jacobi;
/// linear two-point boundary value problems solved with finite differences
pub mod BVP_finite_diff;
/// Lagrange interpolation polynomial
pub mod Lagrange;
/// running the methods from task documents
pub mod task_api;
