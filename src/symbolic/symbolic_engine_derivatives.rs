//! # Symbolic Engine Derivatives Module
//!
//! Analytical differentiation of [`Expr`] trees.
//!
//! ## Key Methods
//! - `diff(var)` - first (partial) derivative
//! - `diff_n(var, order)` - derivative of arbitrary order, order 0 returns the input
//! - `diff_multi_args(vars)` - gradient with respect to the listed variables
//!
//! Every rule produces a raw tree; `diff_n` simplifies between steps so that the
//! trees of higher derivatives do not grow exponentially.
use crate::symbolic::symbolic_engine::Expr;

fn c(val: f64) -> Box<Expr> {
    Box::new(Expr::Const(val))
}

impl Expr {
    /// DIFFERENTIATION

    /// Computes the analytical derivative of the expression with respect to a variable.
    ///
    /// Implements the standard rules:
    /// - Power rule: d/dx(f^n) = n*f^(n-1)*f', general case d/dx(f^g) = f^g*(g'*ln(f) + g*f'/f)
    /// - Product rule: d/dx(f*g) = f'*g + f*g'
    /// - Quotient rule: d/dx(f/g) = (f'*g - g'*f)/g^2
    /// - Chain rule for all unary functions
    ///
    /// ```rust
    /// use RustedNumerics::symbolic::symbolic_engine::Expr;
    /// let f = Expr::parse_expression("x^2").unwrap();
    /// let df_dx = f.diff("x").simplify();
    /// assert_eq!(df_dx.to_string(), "2*x");
    /// ```
    pub fn diff(&self, var: &str) -> Expr {
        match self {
            Expr::Var(name) => {
                if name == var {
                    Expr::Const(1.0)
                } else {
                    Expr::Const(0.0)
                }
            }
            Expr::Const(_) => Expr::Const(0.0),
            Expr::Add(lhs, rhs) => Expr::Add(Box::new(lhs.diff(var)), Box::new(rhs.diff(var))),
            Expr::Sub(lhs, rhs) => Expr::Sub(Box::new(lhs.diff(var)), Box::new(rhs.diff(var))),
            Expr::Mul(lhs, rhs) => Expr::Add(
                Box::new(Expr::Mul(Box::new(lhs.diff(var)), rhs.clone())),
                Box::new(Expr::Mul(lhs.clone(), Box::new(rhs.diff(var)))),
            ),
            Expr::Div(lhs, rhs) => Expr::Div(
                Box::new(Expr::Sub(
                    Box::new(Expr::Mul(Box::new(lhs.diff(var)), rhs.clone())),
                    Box::new(Expr::Mul(Box::new(rhs.diff(var)), lhs.clone())),
                )),
                Box::new(Expr::Pow(rhs.clone(), c(2.0))),
            ),
            Expr::Pow(base, exp) => {
                if !exp.contains_variable(var) {
                    // n*f^(n-1)*f'
                    Expr::Mul(
                        Box::new(Expr::Mul(
                            exp.clone(),
                            Box::new(Expr::Pow(
                                base.clone(),
                                Box::new(Expr::Sub(exp.clone(), c(1.0))),
                            )),
                        )),
                        Box::new(base.diff(var)),
                    )
                } else if !base.contains_variable(var) {
                    // a^g*ln(a)*g'
                    Expr::Mul(
                        Box::new(Expr::Mul(
                            Box::new(self.clone()),
                            Box::new(Expr::Ln(base.clone())),
                        )),
                        Box::new(exp.diff(var)),
                    )
                } else {
                    Expr::Mul(
                        Box::new(self.clone()),
                        Box::new(Expr::Add(
                            Box::new(Expr::Mul(
                                Box::new(exp.diff(var)),
                                Box::new(Expr::Ln(base.clone())),
                            )),
                            Box::new(Expr::Div(
                                Box::new(Expr::Mul(exp.clone(), Box::new(base.diff(var)))),
                                base.clone(),
                            )),
                        )),
                    )
                }
            }
            Expr::Exp(expr) => {
                Expr::Mul(Box::new(Expr::Exp(expr.clone())), Box::new(expr.diff(var)))
            }
            Expr::Ln(expr) => Expr::Div(Box::new(expr.diff(var)), expr.clone()),
            Expr::sin(expr) => {
                Expr::Mul(Box::new(Expr::cos(expr.clone())), Box::new(expr.diff(var)))
            }
            Expr::cos(expr) => Expr::Mul(
                Box::new(Expr::Mul(c(-1.0), Box::new(Expr::sin(expr.clone())))),
                Box::new(expr.diff(var)),
            ),
            Expr::tg(expr) => Expr::Div(
                Box::new(expr.diff(var)),
                Box::new(Expr::Pow(Box::new(Expr::cos(expr.clone())), c(2.0))),
            ),
            Expr::ctg(expr) => Expr::Div(
                Box::new(Expr::Mul(c(-1.0), Box::new(expr.diff(var)))),
                Box::new(Expr::Pow(Box::new(Expr::sin(expr.clone())), c(2.0))),
            ),
            Expr::arcsin(expr) => Expr::Div(
                Box::new(expr.diff(var)),
                Box::new(Expr::Pow(
                    Box::new(Expr::Sub(c(1.0), Box::new(Expr::Pow(expr.clone(), c(2.0))))),
                    c(0.5),
                )),
            ),
            Expr::arccos(expr) => Expr::Div(
                Box::new(Expr::Mul(c(-1.0), Box::new(expr.diff(var)))),
                Box::new(Expr::Pow(
                    Box::new(Expr::Sub(c(1.0), Box::new(Expr::Pow(expr.clone(), c(2.0))))),
                    c(0.5),
                )),
            ),
            Expr::arctg(expr) => Expr::Div(
                Box::new(expr.diff(var)),
                Box::new(Expr::Add(c(1.0), Box::new(Expr::Pow(expr.clone(), c(2.0))))),
            ),
            Expr::arcctg(expr) => Expr::Div(
                Box::new(Expr::Mul(c(-1.0), Box::new(expr.diff(var)))),
                Box::new(Expr::Add(c(1.0), Box::new(Expr::Pow(expr.clone(), c(2.0))))),
            ),
            // |u|' = u/|u| * u'
            Expr::abs(expr) => Expr::Mul(
                Box::new(Expr::Div(expr.clone(), Box::new(Expr::abs(expr.clone())))),
                Box::new(expr.diff(var)),
            ),
        }
    } // end of diff

    /// Derivative of order `order`; order 0 returns a copy of the expression unchanged.
    pub fn diff_n(&self, var: &str, order: usize) -> Expr {
        if order == 0 {
            return self.clone();
        }
        let mut expr = self.clone();
        for _ in 0..order {
            expr = expr.diff(var).simplify();
        }
        expr
    }

    /// Computes partial derivatives with respect to the listed variables, in that order.
    pub fn diff_multi_args(&self, all_vars: &[&str]) -> Vec<Expr> {
        all_vars.iter().map(|var| self.diff(var)).collect()
    }

    /// All partial derivatives, variables taken in alphabetical order.
    pub fn diff_multi(&self) -> Vec<Expr> {
        self.variables().iter().map(|var| self.diff(var)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn eval1(expr: &Expr, x: f64) -> f64 {
        expr.eval_expression(&["x"], &[x]).unwrap()
    }

    /// central difference used to cross-check the analytical rules
    fn numeric_derivative(expr: &Expr, x: f64) -> f64 {
        let h = 1e-6;
        (eval1(expr, x + h) - eval1(expr, x - h)) / (2.0 * h)
    }

    #[test]
    fn test_diff_matches_numerical_derivative() {
        let formulas = [
            "x^3 - 2*x + 1",
            "sin(x)*cos(x)",
            "exp(2*x)/(1 + x^2)",
            "ln(x^2 + 1)",
            "tg(x)",
            "ctg(x)",
            "arcsin(x/2)",
            "arccos(x/2)",
            "arctg(x)",
            "arcctg(x)",
            "sqrt(x + 3)",
            "2^x",
            "x^x",
            "abs(x - 3)",
            "log10(x + 2)",
        ];
        for formula in formulas {
            let f = Expr::parse_expression(formula).unwrap();
            let df = f.diff("x");
            for &x in &[0.3, 0.7, 1.2] {
                let analytical = eval1(&df, x);
                let numerical = numeric_derivative(&f, x);
                assert_relative_eq!(analytical, numerical, epsilon = 1e-5, max_relative = 1e-5);
            }
        }
    }

    #[test]
    fn test_partial_derivatives() {
        let f = Expr::parse_expression("x^2*y + y^3").unwrap();
        let grads = f.diff_multi_args(&["x", "y"]);
        let at = [2.0, 3.0];
        assert_relative_eq!(grads[0].eval_expression(&["x", "y"], &at).unwrap(), 12.0);
        assert_relative_eq!(grads[1].eval_expression(&["x", "y"], &at).unwrap(), 31.0);
        assert_eq!(f.diff("z").simplify(), Expr::Const(0.0));
    }

    #[test]
    fn test_diff_n() {
        let f = Expr::parse_expression("x^4").unwrap();
        assert_eq!(f.diff_n("x", 0), f);
        let d3 = f.diff_n("x", 3);
        assert_relative_eq!(eval1(&d3, 2.0), 48.0);
        let d5 = f.diff_n("x", 5);
        assert_eq!(d5, Expr::Const(0.0));
        let g = Expr::parse_expression("sin(x)").unwrap();
        assert_relative_eq!(eval1(&g.diff_n("x", 4), 0.5), 0.5f64.sin(), epsilon = 1e-12);
    }
}
