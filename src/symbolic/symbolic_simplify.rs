//! # Symbolic Expression Simplification Module
//!
//! Algebraic normalisation used to keep printed results (derivatives, Taylor and
//! Lagrange polynomials) readable. Correctness of the solvers never depends on it:
//! a simplified tree evaluates like the original wherever the original is defined.
//!
//! ## Simplification Strategy
//!
//! 1. **Constant Folding**: nodes whose children are all constants are evaluated with the
//!    checked evaluator; folds that would hit a domain error are left symbolic
//! 2. **Identity Elimination**: x + 0 = x, x * 1 = x, 0 * x = 0, x^1 = x, x^0 = 1, x - x = 0, x / x = 1
//! 3. **Constant Collection**: c1 * (c2 * x) = (c1*c2) * x, constants are moved to the left of products
//! 4. **Power Merging**: x * x = x^2, x^a * x^b = x^(a+b)
//! 5. **Sign Normalisation**: x + (-c) = x - c, x + (-1)*y = x - y
//!
//! The rules run bottom-up and are repeated until the tree stops changing.
use crate::symbolic::symbolic_engine::Expr;

const MAX_PASSES: usize = 16;

fn is_const(expr: &Expr, value: f64) -> bool {
    matches!(expr, Expr::Const(val) if *val == value)
}

impl Expr {
    //___________________________________SIMPLIFICATION____________________________________

    /// Simplifies the expression until a fixed point is reached.
    ///
    /// ```rust
    /// use RustedNumerics::symbolic::symbolic_engine::Expr;
    /// let expr = Expr::parse_expression("0*y + 1*x^1 + 2*3").unwrap();
    /// assert_eq!(expr.simplify().to_string(), "x + 6");
    /// ```
    pub fn simplify(&self) -> Expr {
        let mut current = self.clone();
        for _ in 0..MAX_PASSES {
            let next = current.simplify_();
            if next == current {
                break;
            }
            current = next;
        }
        current
    }

    /// One bottom-up simplification pass.
    pub fn simplify_(&self) -> Expr {
        let expr = self.map_children(|child| child.simplify_());
        if let Some(folded) = expr.fold_constants() {
            return folded;
        }
        match expr {
            Expr::Add(lhs, rhs) => Self::simplify_add(*lhs, *rhs),
            Expr::Sub(lhs, rhs) => Self::simplify_sub(*lhs, *rhs),
            Expr::Mul(lhs, rhs) => Self::simplify_mul(*lhs, *rhs),
            Expr::Div(lhs, rhs) => Self::simplify_div(*lhs, *rhs),
            Expr::Pow(base, exp) => Self::simplify_pow(*base, *exp),
            Expr::Ln(arg) => match *arg {
                Expr::Exp(inner) => *inner,
                other => Expr::Ln(Box::new(other)),
            },
            other => other,
        }
    }

    /// evaluates a node whose children are all constants, None if that is not possible
    fn fold_constants(&self) -> Option<Expr> {
        if matches!(self, Expr::Var(_) | Expr::Const(_)) {
            return None;
        }
        if !self.children().iter().all(|child| matches!(child, Expr::Const(_))) {
            return None;
        }
        match self.eval_expression(&[], &[]) {
            Ok(value) if value.is_finite() => Some(Expr::Const(value)),
            _ => None,
        }
    }

    fn simplify_add(lhs: Expr, rhs: Expr) -> Expr {
        match (&lhs, &rhs) {
            _ if lhs.is_zero() => rhs,
            _ if rhs.is_zero() => lhs,
            _ if lhs == rhs => Expr::Mul(Box::new(Expr::Const(2.0)), Box::new(lhs)),
            (_, Expr::Const(c)) if *c < 0.0 => Expr::Sub(Box::new(lhs), Box::new(Expr::Const(-c))),
            (_, Expr::Mul(factor, rest)) if is_const(factor, -1.0) => {
                Expr::Sub(Box::new(lhs.clone()), rest.clone())
            }
            (_, Expr::Mul(factor, rest)) if matches!(**factor, Expr::Const(c) if c < 0.0) => {
                let c = factor.as_const().unwrap_or(0.0);
                Expr::Sub(
                    Box::new(lhs.clone()),
                    Box::new(Expr::Mul(Box::new(Expr::Const(-c)), rest.clone())),
                )
            }
            // constants move to the right of sums: c + x = x + c
            (Expr::Const(_), _) if !matches!(rhs, Expr::Const(_)) => {
                Expr::Add(Box::new(rhs), Box::new(lhs))
            }
            _ => Expr::Add(Box::new(lhs), Box::new(rhs)),
        }
    }

    fn simplify_sub(lhs: Expr, rhs: Expr) -> Expr {
        match (&lhs, &rhs) {
            _ if rhs.is_zero() => lhs,
            _ if lhs == rhs => Expr::Const(0.0),
            _ if lhs.is_zero() => Expr::Mul(Box::new(Expr::Const(-1.0)), Box::new(rhs)),
            (_, Expr::Const(c)) if *c < 0.0 => Expr::Add(Box::new(lhs), Box::new(Expr::Const(-c))),
            (_, Expr::Mul(factor, rest)) if is_const(factor, -1.0) => {
                Expr::Add(Box::new(lhs.clone()), rest.clone())
            }
            _ => Expr::Sub(Box::new(lhs), Box::new(rhs)),
        }
    }

    fn simplify_mul(lhs: Expr, rhs: Expr) -> Expr {
        match (&lhs, &rhs) {
            _ if lhs.is_zero() || rhs.is_zero() => Expr::Const(0.0),
            _ if is_const(&lhs, 1.0) => rhs,
            _ if is_const(&rhs, 1.0) => lhs,
            // x * c = c * x
            (_, Expr::Const(_)) if !matches!(lhs, Expr::Const(_)) => {
                Expr::Mul(Box::new(rhs), Box::new(lhs))
            }
            // c1 * (c2 * x) = (c1*c2) * x
            (Expr::Const(c1), Expr::Mul(inner_lhs, inner_rhs)) => match inner_lhs.as_ref() {
                Expr::Const(c2) => Expr::Mul(Box::new(Expr::Const(c1 * c2)), inner_rhs.clone()),
                _ => Expr::Mul(Box::new(lhs.clone()), Box::new(rhs.clone())),
            },
            // (c * x) * y = c * (x * y)
            (Expr::Mul(inner_lhs, inner_rhs), _) if matches!(**inner_lhs, Expr::Const(_)) => {
                Expr::Mul(
                    inner_lhs.clone(),
                    Box::new(Expr::Mul(inner_rhs.clone(), Box::new(rhs.clone()))),
                )
            }
            // x * (c * y) = c * (x * y)
            (_, Expr::Mul(inner_lhs, inner_rhs)) if matches!(**inner_lhs, Expr::Const(_)) => {
                Expr::Mul(
                    inner_lhs.clone(),
                    Box::new(Expr::Mul(Box::new(lhs.clone()), inner_rhs.clone())),
                )
            }
            _ if lhs == rhs => Expr::Pow(Box::new(lhs), Box::new(Expr::Const(2.0))),
            // x^a * x^b = x^(a+b)
            (Expr::Pow(base1, exp1), Expr::Pow(base2, exp2)) if base1 == base2 => {
                Expr::Pow(base1.clone(), Box::new(Expr::Add(exp1.clone(), exp2.clone())))
            }
            (Expr::Pow(base, exp), other) | (other, Expr::Pow(base, exp)) if **base == *other => {
                Expr::Pow(base.clone(), Box::new(Expr::Add(exp.clone(), Box::new(Expr::Const(1.0)))))
            }
            _ => Expr::Mul(Box::new(lhs), Box::new(rhs)),
        }
    }

    fn simplify_div(lhs: Expr, rhs: Expr) -> Expr {
        match (&lhs, &rhs) {
            _ if is_const(&rhs, 1.0) => lhs,
            _ if lhs.is_zero() && !rhs.is_zero() => Expr::Const(0.0),
            _ if lhs == rhs && !rhs.is_zero() => Expr::Const(1.0),
            // (c1 * x) / c2 = (c1/c2) * x
            (Expr::Mul(inner_lhs, inner_rhs), Expr::Const(c2)) if *c2 != 0.0 => {
                match inner_lhs.as_ref() {
                    Expr::Const(c1) => Expr::Mul(Box::new(Expr::Const(c1 / c2)), inner_rhs.clone()),
                    _ => Expr::Div(Box::new(lhs.clone()), Box::new(rhs.clone())),
                }
            }
            // x^a / x^b = x^(a-b)
            (Expr::Pow(base1, exp1), Expr::Pow(base2, exp2)) if base1 == base2 => {
                Expr::Pow(base1.clone(), Box::new(Expr::Sub(exp1.clone(), exp2.clone())))
            }
            (Expr::Pow(base, exp), other) if **base == *other => {
                Expr::Pow(base.clone(), Box::new(Expr::Sub(exp.clone(), Box::new(Expr::Const(1.0)))))
            }
            _ => Expr::Div(Box::new(lhs), Box::new(rhs)),
        }
    }

    fn simplify_pow(base: Expr, exp: Expr) -> Expr {
        match (&base, &exp) {
            _ if is_const(&exp, 1.0) => base,
            _ if exp.is_zero() => Expr::Const(1.0),
            _ if is_const(&base, 1.0) => Expr::Const(1.0),
            _ => Expr::Pow(Box::new(base), Box::new(exp)),
        }
    }
}
