// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
//! Classical numerical methods on top of a small symbolic engine.
//!
//! Formulas are parsed into [`symbolic::symbolic_engine::Expr`] trees, differentiated
//! analytically and compiled into checked closures. On top of them:
//! Taylor and Lagrange polynomials, bisection, scalar and n-dimensional Newton-Raphson,
//! Jacobi iterations and finite differences for linear two-point BVP.
//! Iterative methods return an [`numerical::iteration_trace::IterationTrace`] whose
//! terminal state tells how the run ended.
#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
pub mod Examples;
pub mod Utils;
pub mod errors;
pub mod numerical;
pub mod somelinalg;
pub mod symbolic;
pub mod global;
