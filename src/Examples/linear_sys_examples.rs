// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
#![allow(non_snake_case)]

use crate::errors::NumericalError;
use crate::numerical::Jacobi::{jacobi, jacobi_with_guess};
use crate::numerical::iteration_trace::ConvergenceConfig;
use crate::somelinalg::linear_sys_diagnostics::diagonal_dominance;
use crate::somelinalg::matrix_literal::{parse_matrix, parse_vector};
use crate::somelinalg::tridiagonal::Tridiagonal;
use nalgebra::DVector;

pub fn linear_sys_examples(example: usize) -> Result<(), NumericalError> {
    match example {
        0 => {
            // JACOBI on a diagonally dominant system given as literals
            let A = parse_matrix("[[10, -1, 2], [-1, 11, -1], [2, -1, 10]]")?;
            let b = parse_vector("[6, 25, -11]")?;
            println!("diagonal dominance: {:?}", diagonal_dominance(&A));
            let config = ConvergenceConfig::new(1e-10, 100)?;
            let trace = jacobi(&A, &b, &config)?;
            println!("{}", trace.to_table());
            println!("x = {}", trace.ensure_converged()?);
        }
        1 => {
            // JACOBI without diagonal dominance: the budget runs out, the trace is kept
            let A = parse_matrix("1 3; 2 1")?;
            let b = parse_vector("1 1")?;
            let x0 = DVector::from_vec(vec![0.1, 0.1]);
            let config = ConvergenceConfig::default().with_max_iterations(20);
            let trace = jacobi_with_guess(&A, &b, &x0, &config)?;
            println!("state {:?}, last {:?}", trace.state(), trace.last());
            if let Err(err) = trace.ensure_converged() {
                println!("{}", err);
            }
        }
        2 => {
            // TRIDIAGONAL system solved with the Thomas algorithm
            let system = Tridiagonal::new(vec![-1.0; 4], vec![2.0; 5], vec![-1.0; 4])?;
            let rhs = DVector::from_vec(vec![1.0, 0.0, 0.0, 0.0, 1.0]);
            let x = system.solve(&rhs)?;
            println!("x = {}, residual = {:e}", x, (system.mul_vec(&x) - rhs).amax());
        }
        _ => {
            println!("no linear systems example {}", example);
        }
    }
    Ok(())
}
