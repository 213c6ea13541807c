//! Polynomials with dense coefficients around a centre:
//! `p(x) = c0 + c1*(x - a) + c2*(x - a)^2 + ...`
//!
//! Taylor expansion produces polynomials centred at the expansion point, Lagrange
//! interpolation produces polynomials centred at zero.
use crate::symbolic::symbolic_engine::Expr;
use std::fmt;

#[derive(Clone, Debug, PartialEq)]
pub struct Polynomial {
    coefficients: Vec<f64>,
    center: f64,
    variable: String,
}

impl Polynomial {
    pub fn new(coefficients: Vec<f64>, center: f64, variable: &str) -> Self {
        let coefficients = if coefficients.is_empty() {
            vec![0.0]
        } else {
            coefficients
        };
        Self {
            coefficients,
            center,
            variable: variable.to_string(),
        }
    }

    /// polynomial in `x` centred at zero
    pub fn from_coefficients(coefficients: Vec<f64>) -> Self {
        Self::new(coefficients, 0.0, "x")
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn center(&self) -> f64 {
        self.center
    }

    pub fn variable(&self) -> &str {
        &self.variable
    }

    /// index of the highest nonzero coefficient, 0 for the zero polynomial
    pub fn degree(&self) -> usize {
        self.coefficients
            .iter()
            .rposition(|c| *c != 0.0)
            .unwrap_or(0)
    }

    /// Horner evaluation in powers of `(x - center)`
    pub fn eval(&self, x: f64) -> f64 {
        let t = x - self.center;
        self.coefficients.iter().rev().fold(0.0, |acc, c| acc * t + c)
    }

    pub fn derivative(&self) -> Polynomial {
        let coefficients: Vec<f64> = self
            .coefficients
            .iter()
            .enumerate()
            .skip(1)
            .map(|(k, c)| k as f64 * c)
            .collect();
        Polynomial::new(coefficients, self.center, &self.variable)
    }

    /// Same polynomial written in plain powers of the variable (centre 0).
    pub fn expanded(&self) -> Polynomial {
        if self.center == 0.0 {
            return self.clone();
        }
        let n = self.coefficients.len();
        let mut result = vec![0.0; n];
        // (x - a)^k = sum_j C(k, j) x^j (-a)^(k - j)
        for (k, c) in self.coefficients.iter().enumerate() {
            let mut binomial = 1.0;
            for j in 0..=k {
                result[j] += c * binomial * (-self.center).powi((k - j) as i32);
                binomial = binomial * (k - j) as f64 / (j + 1) as f64;
            }
        }
        Polynomial::new(result, 0.0, &self.variable)
    }

    /// Sets coefficients smaller than `eps` times the largest one to zero.
    pub fn chop(&self, eps: f64) -> Polynomial {
        self.chop_within(eps, 1.0)
    }

    /// Like [`Polynomial::chop`], but term `k` is measured as `|c_k| * radius^k`, its size on
    /// `|x - center| <= radius`.
    pub fn chop_within(&self, eps: f64, radius: f64) -> Polynomial {
        let radius = if radius > 0.0 && radius.is_finite() { radius } else { 1.0 };
        let sizes: Vec<f64> = self
            .coefficients
            .iter()
            .enumerate()
            .map(|(k, c)| c.abs() * radius.powi(k as i32))
            .collect();
        let scale = sizes.iter().fold(0.0_f64, |acc, size| acc.max(*size));
        let coefficients = self
            .coefficients
            .iter()
            .zip(sizes.iter())
            .map(|(c, size)| if *size <= eps * scale { 0.0 } else { *c })
            .collect();
        Polynomial::new(coefficients, self.center, &self.variable)
    }

    fn base(&self) -> Expr {
        let var = Expr::Var(self.variable.clone());
        if self.center == 0.0 {
            var
        } else {
            var - Expr::Const(self.center)
        }
    }

    /// Symbolic form of the polynomial, ready for differentiation or compilation.
    pub fn to_expr(&self) -> Expr {
        let terms: Vec<Expr> = self
            .coefficients
            .iter()
            .enumerate()
            .filter(|(_, c)| **c != 0.0)
            .map(|(k, c)| match k {
                0 => Expr::Const(*c),
                1 => Expr::Const(*c) * self.base(),
                _ => Expr::Const(*c) * self.base().pow(Expr::Const(k as f64)),
            })
            .collect();
        terms
            .into_iter()
            .reduce(|acc, term| acc + term)
            .unwrap_or(Expr::Const(0.0))
            .simplify()
    }

    fn base_string(&self, power: usize) -> String {
        let base = if self.center == 0.0 {
            self.variable.clone()
        } else if self.center > 0.0 {
            format!("({} - {})", self.variable, self.center)
        } else {
            format!("({} + {})", self.variable, -self.center)
        };
        if power == 1 {
            base
        } else {
            format!("{}^{}", base, power)
        }
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut first = true;
        for (k, c) in self.coefficients.iter().enumerate() {
            if *c == 0.0 {
                continue;
            }
            let magnitude = if first { *c } else { c.abs() };
            if !first {
                write!(f, "{}", if *c < 0.0 { " - " } else { " + " })?;
            }
            if k == 0 {
                write!(f, "{}", magnitude)?;
            } else if magnitude == 1.0 {
                write!(f, "{}", self.base_string(k))?;
            } else if magnitude == -1.0 {
                write!(f, "-{}", self.base_string(k))?;
            } else {
                write!(f, "{}*{}", magnitude, self.base_string(k))?;
            }
            first = false;
        }
        if first {
            write!(f, "0")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_display() {
        assert_eq!(
            Polynomial::from_coefficients(vec![1.0, 2.0, 1.0]).to_string(),
            "1 + 2*x + x^2"
        );
        assert_eq!(
            Polynomial::new(vec![0.0, -1.0, 0.0, 0.5], 2.0, "x").to_string(),
            "-(x - 2) + 0.5*(x - 2)^3"
        );
        assert_eq!(
            Polynomial::new(vec![3.0, -2.0], -1.5, "t").to_string(),
            "3 - 2*(t + 1.5)"
        );
        assert_eq!(Polynomial::from_coefficients(vec![0.0, 0.0]).to_string(), "0");
    }

    #[test]
    fn test_eval_degree_derivative() {
        let p = Polynomial::new(vec![1.0, 2.0, 3.0, 0.0], 1.0, "x");
        assert_eq!(p.degree(), 2);
        // 1 + 2*(x-1) + 3*(x-1)^2 at x = 3
        assert_relative_eq!(p.eval(3.0), 17.0);
        let dp = p.derivative();
        assert_eq!(dp.coefficients(), &[2.0, 6.0, 0.0]);
        assert_relative_eq!(dp.eval(3.0), 14.0);
        assert_eq!(Polynomial::from_coefficients(vec![5.0]).derivative().degree(), 0);
    }

    #[test]
    fn test_expanded_and_expr() {
        // (x - 2)^2 = x^2 - 4x + 4
        let p = Polynomial::new(vec![0.0, 0.0, 1.0], 2.0, "x");
        let e = p.expanded();
        assert_eq!(e.center(), 0.0);
        assert_eq!(e.coefficients(), &[4.0, -4.0, 1.0]);
        let expr = p.to_expr();
        for x in [-1.0, 0.5, 3.0] {
            assert_relative_eq!(expr.eval_expression(&["x"], &[x]).unwrap(), p.eval(x));
        }
        assert_eq!(Polynomial::from_coefficients(vec![0.0]).to_expr(), Expr::Const(0.0));
    }

    #[test]
    fn test_chop() {
        let p = Polynomial::from_coefficients(vec![1.0, 1e-17, 2.0]).chop(1e-12);
        assert_eq!(p.coefficients(), &[1.0, 0.0, 2.0]);
        // 1e-3*x^2 is a 4e3 term on |x| <= 2000 and survives
        let q = Polynomial::from_coefficients(vec![1e12, 1e-7, 1e-3]);
        assert_eq!(q.chop(1e-14).coefficients(), &[1e12, 0.0, 0.0]);
        assert_eq!(q.chop_within(1e-14, 2000.0).coefficients(), &[1e12, 0.0, 1e-3]);
    }
}
