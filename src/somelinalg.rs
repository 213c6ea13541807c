//! some linear algebra functions used throughout the code
#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
/// diagnostics for linear systems and matrices: if it is singular,
/// poorly conditioned or diagonally dominant
pub mod linear_sys_diagnostics;
/// strict parser of matrix and vector literals
pub mod matrix_literal;
/// tridiagonal systems: Thomas algorithm with a dense LU fall-back
pub mod tridiagonal;
