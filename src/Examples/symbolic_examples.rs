// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
#![allow(non_snake_case)]

use crate::errors::NumericalError;
use crate::symbolic::parse_expr::parse_with_variables;
use crate::symbolic::symbolic_engine::Expr;
use crate::symbolic::symbolic_functions::Jacobian;
use crate::symbolic::utils::linspace;

pub fn sym_examples(example: usize) -> Result<(), NumericalError> {
    match example {
        0 => {
            // FUNCTION OF MULTIPLE VARIABLES
            //parse expression from string to symbolic expression
            let input = "exp(x) + ln(y)";
            let parsed_expression = Expr::parse_expression(input)?;
            println!(" parsed_expression {}", parsed_expression);
            // return vec of all variables
            let variables = parsed_expression.variables();
            println!("variables {:?}", variables);
            // differentiate with respect to x and y
            let df_dx = parsed_expression.diff("x");
            let df_dy = parsed_expression.diff("y");
            println!("df_dx = {}, df_dy = {}", df_dx, df_dy);
            //convert symbolic expression to a Rust function and evaluate the function
            let function_of_x_and_y = parsed_expression.compile(&["x", "y"])?;
            let f_res = function_of_x_and_y(&[1.0, 2.0])?;
            println!("f_res = {}", f_res);
            // or evaluate directly without building a closure
            let f_res = parsed_expression.eval_expression(&["x", "y"], &[1.0, 2.0])?;
            println!("f_res2 = {}", f_res);
            // vector of derivatives with respect to all variables
            let vector_of_derivatives = parsed_expression.diff_multi();
            println!("vector_of_derivatives = {:?}", vector_of_derivatives);
        }
        1 => {
            // FUNCTION OF 1 VARIABLE
            let f = Expr::parse_expression("x*sin(x) + x^3")?;
            let d3f = f.diff_n("x", 3).simplify();
            println!("f = {}, d3f/dx3 = {}", f, d3f);
            // evaluate on a grid
            let grid = linspace(0.0, 1.0, 5);
            let values = f.eval_on_points("x", &grid)?;
            println!("x = {:?} \n f(x) = {:?}", grid, values);
            // evaluation errors are reported, not turned into NaN
            let g = Expr::parse_expression("ln(x)")?;
            match g.eval_expression(&["x"], &[-1.0]) {
                Ok(value) => println!("ln(-1) = {}", value),
                Err(err) => println!("ln(-1) failed: {}", err),
            }
        }
        2 => {
            // SOME USEFUL FEATURES
            // a symbolic function can be defined without parsing
            let vector_of_symbolic_vars = Expr::Symbols("a, b, c");
            let (a, b, c) = (
                vector_of_symbolic_vars[0].clone(),
                vector_of_symbolic_vars[1].clone(),
                vector_of_symbolic_vars[2].clone(),
            );
            let symbolic_expression = a + (b * c).exp();
            println!("symbolic_expression = {}", symbolic_expression);
            // change a variable into a constant
            let expression_with_const = symbolic_expression.substitute("a", 1.0).simplify();
            println!("expression_with_const = {}", expression_with_const);
            // or into another expression
            let t = Expr::parse_expression("t^2")?;
            println!("b -> t^2: {}", expression_with_const.substitute_expr("b", &t));
            // formulas restricted to known variables
            match parse_with_variables("x + z", &["x"]) {
                Ok(expr) => println!("parsed {}", expr),
                Err(err) => println!("rejected: {}", err),
            }
        }
        3 => {
            // JACOBIAN
            let mut Jacobian_instance = Jacobian::new();
            // set vector of functions
            Jacobian_instance.set_funcvecor_from_str(&["2*x^3 + y", "x*y - 1"])?;
            // set vector of variables
            Jacobian_instance.set_variables(&["x", "y"]);
            // calculate symbolic jacobian
            Jacobian_instance.calc_jacobian()?;
            // transform into human readable form
            Jacobian_instance.readable_jacobian();
            println!(
                "Jacobian_instance: Jacobian {:?}",
                Jacobian_instance.readable_jacobian
            );
            // calculate element of jacobian (just for control)
            let ij_element = Jacobian_instance.calc_ij_element(0, 0, &[10.0, 2.0])?;
            println!("ij_element = {:?} \n", ij_element);
            // generate jacobian made of regular rust functions and evaluate it
            Jacobian_instance.jacobian_generate()?;
            Jacobian_instance.lambdify_funcvector()?;
            let J = Jacobian_instance.evaluate_func_jacobian_DMatrix_unmut(&[10.0, 2.0])?;
            let F = Jacobian_instance.evaluate_funvector_lambdified_DVector_unmut(&[10.0, 2.0])?;
            println!("J = {} F = {}", J, F);
        }
        _ => {
            println!("no symbolic example {}", example);
        }
    }
    Ok(())
}
