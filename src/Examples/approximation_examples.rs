// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License

use crate::errors::NumericalError;
use crate::numerical::Lagrange::lagrange;
use crate::numerical::Taylor::{taylor, taylor_report};
use crate::symbolic::symbolic_engine::Expr;

pub fn approximation_examples(example: usize) -> Result<(), NumericalError> {
    match example {
        0 => {
            // TAYLOR POLYNOMIALS of growing degree
            let f = Expr::parse_expression("exp(x)*sin(x)")?;
            for n in [1, 3, 5] {
                let report = taylor_report(&f, 0.0, n, 0.5)?;
                println!("degree {}:\n{}", n, report.to_table());
            }
            // around a point other than zero
            let g = Expr::parse_expression("ln(x)")?;
            let t = taylor(&g, 1.0, 4)?;
            println!("ln(x) ~ {}", t);
            println!("expanded: {}", t.expanded());
        }
        1 => {
            // LAGRANGE INTERPOLATION
            let points = [(0.0, 1.0), (1.0, 2.0), (2.0, 5.0)];
            let P = lagrange(&points)?;
            println!("P(x) = {}", P);
            // nodes sampled from a known function
            let nodes: Vec<(f64, f64)> = [0.0, 0.5, 1.0, 1.5, 2.0]
                .iter()
                .map(|&x: &f64| (x, x.cos()))
                .collect();
            let P = lagrange(&nodes)?;
            println!("P(x) = {}, P(0.75) = {}, cos(0.75) = {}", P, P.eval(0.75), 0.75f64.cos());
        }
        _ => {
            println!("no approximation example {}", example);
        }
    }
    Ok(())
}
