//! Compilation of symbolic expressions into checked numeric closures.
//!
//! Evaluation never silently returns NaN or infinity: division by zero, logarithms of
//! non-positive values, fractional powers of negative numbers, inverse trigonometric
//! functions outside [-1, 1] and overflow are all reported as [`DomainError`].
use crate::errors::{DomainError, NumericalError, ParseError};
use crate::symbolic::symbolic_engine::Expr;
use std::f64::consts::PI;

/// function of the variables listed at compilation, in that order
pub type NumericFunction = Box<dyn Fn(&[f64]) -> Result<f64, DomainError> + Send + Sync>;
/// function of a single variable
pub type ScalarFunction = Box<dyn Fn(f64) -> Result<f64, DomainError> + Send + Sync>;

type UnaryFn = fn(f64) -> Result<f64, DomainError>;
type BinaryFn = fn(f64, f64) -> Result<f64, DomainError>;

enum Node<'a> {
    Var(&'a str),
    Const(f64),
    Unary(&'a Expr, UnaryFn),
    Binary(&'a Expr, &'a Expr, BinaryFn),
}

fn finite(operation: &str, value: f64) -> Result<f64, DomainError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(DomainError::NonFinite {
            operation: operation.to_string(),
        })
    }
}

fn checked_div(a: f64, b: f64) -> Result<f64, DomainError> {
    if b == 0.0 {
        return Err(DomainError::DivisionByZero);
    }
    finite("division", a / b)
}

fn checked_pow(base: f64, exponent: f64) -> Result<f64, DomainError> {
    if base < 0.0 && exponent.fract() != 0.0 {
        return Err(DomainError::NegativeBaseFractionalPower { base, exponent });
    }
    if base == 0.0 && exponent < 0.0 {
        return Err(DomainError::DivisionByZero);
    }
    finite("power", base.powf(exponent))
}

fn checked_ln(value: f64) -> Result<f64, DomainError> {
    if value <= 0.0 {
        return Err(DomainError::LogarithmOfNonPositive { value });
    }
    finite("ln", value.ln())
}

fn checked_unit_interval(function: &str, value: f64) -> Result<f64, DomainError> {
    if !(-1.0..=1.0).contains(&value) {
        return Err(DomainError::OutOfDomain {
            function: function.to_string(),
            value,
        });
    }
    Ok(value)
}

fn checked_ctg(value: f64) -> Result<f64, DomainError> {
    let (sin, cos) = value.sin_cos();
    checked_div(cos, sin)
}

impl Expr {
    fn node(&self) -> Node<'_> {
        match self {
            Expr::Var(name) => Node::Var(name),
            Expr::Const(val) => Node::Const(*val),
            Expr::Add(lhs, rhs) => Node::Binary(lhs, rhs, |a, b| finite("addition", a + b)),
            Expr::Sub(lhs, rhs) => Node::Binary(lhs, rhs, |a, b| finite("subtraction", a - b)),
            Expr::Mul(lhs, rhs) => {
                Node::Binary(lhs, rhs, |a, b| finite("multiplication", a * b))
            }
            Expr::Div(lhs, rhs) => Node::Binary(lhs, rhs, checked_div),
            Expr::Pow(base, exp) => Node::Binary(base, exp, checked_pow),
            Expr::Exp(arg) => Node::Unary(arg, |v| finite("exp", v.exp())),
            Expr::Ln(arg) => Node::Unary(arg, checked_ln),
            Expr::sin(arg) => Node::Unary(arg, |v| finite("sin", v.sin())),
            Expr::cos(arg) => Node::Unary(arg, |v| finite("cos", v.cos())),
            Expr::tg(arg) => Node::Unary(arg, |v| {
                let (sin, cos) = v.sin_cos();
                checked_div(sin, cos)
            }),
            Expr::ctg(arg) => Node::Unary(arg, checked_ctg),
            Expr::arcsin(arg) => {
                Node::Unary(arg, |v| checked_unit_interval("arcsin", v).map(f64::asin))
            }
            Expr::arccos(arg) => {
                Node::Unary(arg, |v| checked_unit_interval("arccos", v).map(f64::acos))
            }
            Expr::arctg(arg) => Node::Unary(arg, |v| finite("arctg", v.atan())),
            Expr::arcctg(arg) => Node::Unary(arg, |v| finite("arcctg", PI / 2.0 - v.atan())),
            Expr::abs(arg) => Node::Unary(arg, |v| finite("abs", v.abs())),
        }
    }

    /// Converts the expression into a closure of the listed variables.
    ///
    /// Fails with [`ParseError::UnknownSymbol`] if the expression uses a variable that is
    /// not listed. The returned closure expects exactly `vars.len()` values and panics if
    /// given fewer.
    /// ```rust
    /// use RustedNumerics::symbolic::symbolic_engine::Expr;
    /// let f = Expr::parse_expression("x^2 + y").unwrap();
    /// let compiled = f.compile(&["x", "y"]).unwrap();
    /// assert_eq!(compiled(&[3.0, 1.0]).unwrap(), 10.0);
    /// let g = Expr::parse_expression("ln(x)").unwrap().compile(&["x"]).unwrap();
    /// assert!(g(&[0.0]).is_err());
    /// ```
    pub fn compile(&self, vars: &[&str]) -> Result<NumericFunction, ParseError> {
        match self.node() {
            Node::Var(name) => {
                let index = vars.iter().position(|&v| v == name).ok_or_else(|| {
                    ParseError::UnknownSymbol {
                        name: name.to_string(),
                    }
                })?;
                Ok(Box::new(move |args: &[f64]| -> Result<f64, DomainError> {
                    Ok(args[index])
                }))
            }
            Node::Const(val) => Ok(Box::new(move |_: &[f64]| -> Result<f64, DomainError> {
                Ok(val)
            })),
            Node::Unary(arg, op) => {
                let arg_fn = arg.compile(vars)?;
                Ok(Box::new(move |args: &[f64]| op(arg_fn(args)?)))
            }
            Node::Binary(lhs, rhs, op) => {
                let lhs_fn = lhs.compile(vars)?;
                let rhs_fn = rhs.compile(vars)?;
                Ok(Box::new(move |args: &[f64]| op(lhs_fn(args)?, rhs_fn(args)?)))
            }
        }
    }

    /// Single-variable shortcut over [`Expr::compile`].
    pub fn compile1D(&self, var: &str) -> Result<ScalarFunction, ParseError> {
        let compiled = self.compile(&[var])?;
        Ok(Box::new(move |x: f64| compiled(&[x])))
    }

    /// Evaluates the expression directly without creating a closure.
    pub fn eval_expression(&self, vars: &[&str], values: &[f64]) -> Result<f64, NumericalError> {
        match self.node() {
            Node::Var(name) => vars
                .iter()
                .position(|&v| v == name)
                .and_then(|index| values.get(index).copied())
                .ok_or_else(|| {
                    ParseError::UnknownSymbol {
                        name: name.to_string(),
                    }
                    .into()
                }),
            Node::Const(val) => Ok(val),
            Node::Unary(arg, op) => Ok(op(arg.eval_expression(vars, values)?)?),
            Node::Binary(lhs, rhs, op) => Ok(op(
                lhs.eval_expression(vars, values)?,
                rhs.eval_expression(vars, values)?,
            )?),
        }
    }

    /// Evaluates a single-variable expression at every point of `xs`.
    pub fn eval_on_points(&self, var: &str, xs: &[f64]) -> Result<Vec<f64>, NumericalError> {
        let f = self.compile1D(var)?;
        xs.iter().map(|&x| f(x).map_err(NumericalError::from)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbolic::utils::linspace;
    use approx::assert_relative_eq;

    fn compile_x(formula: &str) -> ScalarFunction {
        Expr::parse_expression(formula)
            .unwrap()
            .compile1D("x")
            .unwrap()
    }

    #[test]
    fn test_compile_matches_direct_formulas() {
        let cases: Vec<(&str, fn(f64) -> f64)> = vec![
            ("x^2 - 2*x + 1", |x| x * x - 2.0 * x + 1.0),
            ("sin(x)*exp(-x)", |x| x.sin() * (-x).exp()),
            ("ln(x + 1)/sqrt(x + 2)", |x| (x + 1.0).ln() / (x + 2.0).sqrt()),
            ("cos(x)^3 + tg(x/4)", |x| x.cos().powi(3) + (x / 4.0).tan()),
            ("arctg(x) + arcctg(x)", |_| PI / 2.0),
            ("ctg(x + 1)", |x| 1.0 / (x + 1.0).tan()),
            ("abs(x - 1)*log10(x + 10)", |x| (x - 1.0).abs() * (x + 10.0).log10()),
            ("2**x - x**0.5", |x| 2f64.powf(x) - x.sqrt()),
            ("arcsin(x/5) - arccos(x/5)", |x| (x / 5.0).asin() - (x / 5.0).acos()),
        ];
        for (formula, exact) in cases {
            let f = compile_x(formula);
            for x in linspace(0.1, 3.0, 7) {
                assert_relative_eq!(f(x).unwrap(), exact(x), epsilon = 1e-12, max_relative = 1e-12);
            }
        }
    }

    #[test]
    fn test_domain_errors() {
        assert_eq!(compile_x("1/x")(0.0), Err(DomainError::DivisionByZero));
        assert_eq!(
            compile_x("ln(x)")(-1.0),
            Err(DomainError::LogarithmOfNonPositive { value: -1.0 })
        );
        assert_eq!(
            compile_x("x^0.5")(-4.0),
            Err(DomainError::NegativeBaseFractionalPower {
                base: -4.0,
                exponent: 0.5
            })
        );
        assert!(matches!(
            compile_x("arcsin(x)")(2.0),
            Err(DomainError::OutOfDomain { .. })
        ));
        assert!(matches!(
            compile_x("exp(x)")(1000.0),
            Err(DomainError::NonFinite { .. })
        ));
        assert_eq!(compile_x("ctg(x)")(0.0), Err(DomainError::DivisionByZero));
        // integer powers of negative numbers are fine
        assert_relative_eq!(compile_x("x^3")(-2.0).unwrap(), -8.0);
    }

    #[test]
    fn test_compile_unknown_variable() {
        let f = Expr::parse_expression("x + y").unwrap();
        assert!(matches!(
            f.compile(&["x"]),
            Err(ParseError::UnknownSymbol { .. })
        ));
        assert!(f.compile(&["y", "x"]).is_ok());
    }

    #[test]
    fn test_eval_expression_and_points() {
        let f = Expr::parse_expression("x*y - 1").unwrap();
        assert_relative_eq!(f.eval_expression(&["x", "y"], &[2.0, 3.0]).unwrap(), 5.0);
        assert!(matches!(
            f.eval_expression(&["x"], &[2.0]),
            Err(NumericalError::Parse(ParseError::UnknownSymbol { .. }))
        ));
        let g = Expr::parse_expression("x^2").unwrap();
        assert_eq!(g.eval_on_points("x", &[1.0, 2.0, 3.0]).unwrap(), vec![1.0, 4.0, 9.0]);
        assert!(matches!(
            Expr::parse_expression("1/x").unwrap().eval_on_points("x", &[1.0, 0.0]),
            Err(NumericalError::Domain(DomainError::DivisionByZero))
        ));
    }
}
