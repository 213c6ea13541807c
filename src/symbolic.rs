#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
/// a module turns a String expression into a symbolic expression
///
///# Example
/// ```
/// use RustedNumerics::symbolic::symbolic_engine::Expr;
/// let input = "x^2.3*ln(x + y + y^2.6)";
/// let parsed_expression = Expr::parse_expression(input).unwrap();
/// println!(" parsed_expression {}", parsed_expression);
/// let parsed_function = parsed_expression.compile(&["x", "y"]).unwrap();
/// println!("{}, Rust function: {:?}  \n", input, parsed_function(&[1.0, 2.0]));
/// ```
/// ________________________________________________________________________________________________________________________________
pub mod parse_expr;
///____________________________________________________________________________________________________________________________
/// # Symbolic engine
/// a module
/// 1) holds the expression tree and its operators
/// 2) substitutes variables by numbers or by other expressions
/// 3) prints expressions in a form the parser reads back
///# Example#
/// ```
/// use RustedNumerics::symbolic::symbolic_engine::Expr;
/// let input = "exp(x) + ln(y)";
/// // here you've got symbolic expression
/// let parsed_expression = Expr::parse_expression(input).unwrap();
/// // return vec of all variables
/// assert_eq!(parsed_expression.variables(), vec!["x", "y"]);
/// // differentiate with respect to x and y
/// let df_dx = parsed_expression.diff("x").simplify();
/// let df_dy = parsed_expression.diff("y").simplify();
/// println!("df_dx = {}, df_dy = {}", df_dx, df_dy);
/// // fix y = 1 and evaluate at x = 0
/// let g = parsed_expression.substitute("y", 1.0);
/// assert_eq!(g.eval_expression(&["x"], &[0.0]).unwrap(), 1.0);
/// ```
pub mod symbolic_engine;
/// analytical derivatives: first, n-th and partial
pub mod symbolic_engine_derivatives;
mod symbolic_engine_tests;
/// compilation of expressions into checked Rust closures
pub mod symbolic_lambdify;
/// constant folding and identity elimination for readable output
pub mod symbolic_simplify;
/// symbolic Jacobian of a vector function, evaluated as nalgebra matrices
///# Example#
/// ```
/// use RustedNumerics::symbolic::symbolic_functions::Jacobian;
/// let mut Jacobian_instance = Jacobian::new();
/// Jacobian_instance.set_funcvecor_from_str(&["x^2 + y^2 - 10", "x - y - 4"]).unwrap();
/// Jacobian_instance.set_variables(&["x", "y"]);
/// Jacobian_instance.calc_jacobian().unwrap();
/// Jacobian_instance.jacobian_generate().unwrap();
/// let J = Jacobian_instance.evaluate_func_jacobian_DMatrix_unmut(&[1.0, 2.0]).unwrap();
/// assert_eq!(J[(0, 1)], 4.0);
/// ```
pub mod symbolic_functions;
/// dense polynomials around a centre, used by Taylor and Lagrange
pub mod polynomial;
pub mod utils;
