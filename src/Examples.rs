//! examples of usage of RustedNumerics
/// Taylor and Lagrange polynomials
pub mod approximation_examples;
/// finite differences for linear BVP
pub mod bvp_examples;
/// Jacobi iterations, tridiagonal systems and matrix literals
pub mod linear_sys_examples;
/// bisection and Newton-Raphson, scalar and systems
pub mod nonlinear_eqs_examples;
/// Symbolic operations examples
pub mod symbolic_examples;
/// task documents, logging and csv export
pub mod utils_examples;
