// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
#![allow(non_snake_case)]

use crate::errors::NumericalError;
use crate::numerical::BVP_finite_diff::{BVPProblem, finite_differences};
use std::f64::consts::{E, FRAC_PI_2};

/// Linear two-point problems `y'' = p(x) y' + q(x) y + r(x)` solved with finite differences.
pub fn bvp_examples(example: usize) -> Result<(), NumericalError> {
    match example {
        0 => {
            // y'' = -y, y(0) = 0, y(pi/2) = 1, exact solution sin(x)
            let problem = BVPProblem::from_formulas("0", "-1", "0", (0.0, 0.0), (FRAC_PI_2, 1.0))?;
            let solution = finite_differences(&problem, 9)?;
            println!("{}", solution.to_table());
            println!("max error = {:e}", solution.max_error(f64::sin));
        }
        1 => {
            // y'' = y', y(0) = 1, y(1) = e, exact solution exp(x); error falls as h^2
            let problem = BVPProblem::from_closures(|_| 1.0, |_| 0.0, |_| 0.0, (0.0, 1.0), (1.0, E))?;
            for n in [4, 9, 19, 39] {
                let solution = finite_differences(&problem, n)?;
                println!("n = {}, max error = {:e}", n, solution.max_error(f64::exp));
            }
        }
        2 => {
            // variable coefficients: y'' = -(2/x) y' + (2/x^2) y + sin(ln(x))/x^2 on [1, 2]
            let problem = BVPProblem::from_formulas(
                "-2/x",
                "2/x^2",
                "sin(ln(x))/x^2",
                (1.0, 1.0),
                (2.0, 2.0),
            )?;
            let solution = finite_differences(&problem, 9)?;
            println!("{}", solution.to_table());
        }
        _ => {
            println!("no BVP example {}", example);
        }
    }
    Ok(())
}
