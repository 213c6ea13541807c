// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
#![allow(non_snake_case)]

use crate::errors::NumericalError;
use crate::numerical::Bisection::bisection;
use crate::numerical::NR::newton_raphson;
use crate::numerical::NR_system::{NR_system, newton_raphson_n};
use crate::numerical::iteration_trace::ConvergenceConfig;
use crate::symbolic::symbolic_engine::Expr;

pub fn nonlinear_eqs_examples(example: usize) -> Result<(), NumericalError> {
    match example {
        0 => {
            // BISECTION
            let f = Expr::parse_expression("x^3 - x - 2")?;
            let config = ConvergenceConfig::default().with_tolerance(1e-8);
            let trace = bisection(&f, 1.0, 2.0, &config)?;
            println!("{}", trace.to_table());
            println!("root = {:?}, state {:?}", trace.solution().map(|p| p.p), trace.state());
        }
        1 => {
            // NEWTON-RAPHSON, scalar
            let f = Expr::parse_expression("cos(x) - x")?;
            let config = ConvergenceConfig::new(1e-12, 50)?;
            let trace = newton_raphson(&f, 1.0, &config)?;
            println!("{}", trace.to_table());
            let root = trace.ensure_converged()?;
            println!("root = {}", root);
            // a zero derivative stops the iterations, the partial trace is kept
            let g = Expr::parse_expression("x^2 + 1")?;
            let trace = newton_raphson(&g, 0.0, &config)?;
            println!("x^2 + 1 from 0: {:?}", trace.state());
        }
        2 => {
            // NEWTON-RAPHSON for systems, the shortest way
            let trace = newton_raphson_n(&["x0^2 + x1^2 - 10", "x0 - x1 - 4"], &[1.0, 1.0], 10)?;
            println!("{}", trace.to_table());
            println!("solution = {:?}", trace.solution());
        }
        3 => {
            // NEWTON-RAPHSON for systems, the verbose way with named unknowns
            let eq_system = Expr::parse_vector_expression(vec!["x*y - 2", "x + y^2 - 3"])?;
            let mut NR_instance = NR_system::new();
            NR_instance.set_equation_system(
                eq_system,
                Some(vec!["x".to_string(), "y".to_string()]),
                vec![1.5, 1.5],
                8,
            )?;
            NR_instance.eq_generate()?;
            println!("Jacobian: {:?}", NR_instance.jacobian.readable_jacobian);
            let trace = NR_instance.solve()?;
            println!("{}", trace.to_table());
            println!("result = {:?}", NR_instance.get_result(&trace));
        }
        _ => {
            println!("no nonlinear equations example {}", example);
        }
    }
    Ok(())
}
